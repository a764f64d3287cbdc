//! Every resource managed through the admin panel

admin_resources! {
    /// Course catalogue; cover images are sent as multipart
    courses, COURSES => "courses", upload = "image";
    /// Blog posts with a cover image
    blogs, BLOGS => "blogs", upload = "image";
    team_members, TEAM_MEMBERS => "team-members", upload = "image";
    /// Student testimonials; the avatar travels with the record
    testimonials, TESTIMONIALS => "testimonials", upload = "avatar";
    trustpilot_reviews, TRUSTPILOT_REVIEWS => "trustpilot-reviews", upload = "avatar";
    /// Mentor profiles; images are normally uploaded ahead of the save
    mentors, MENTORS => "mentors", upload = "image";
    faqs, FAQS => "faqs";
    company_logos, COMPANY_LOGOS => "company-logos";
    company_info, COMPANY_INFO => "company-info";
    coupons, COUPONS => "coupons";
    stats, STATS => "stats";
    features, FEATURES => "features";
    curriculum, CURRICULUM => "curriculum";
    projects, PROJECTS => "projects";
    certifications, CERTIFICATIONS => "certifications";
    placements, PLACEMENTS => "placements";
    hiring_partners, HIRING_PARTNERS => "hiring-partners";
    tools, TOOLS => "tools";
    pricing_plans, PRICING_PLANS => "pricing-plans";
    batches, BATCHES => "batches";
    announcements, ANNOUNCEMENTS => "announcements";
    social_links, SOCIAL_LINKS => "social-links";
    video_testimonials, VIDEO_TESTIMONIALS => "video-testimonials";
    success_stories, SUCCESS_STORIES => "success-stories";
    /// Admin panel accounts
    users, USERS => "users";
}
