//! Built-in form schemas
//!
//! Public application modules are submitted to `/accreditation/apply/{slug}`
//! with the record nested under `form_data`; volunteer registration posts the
//! bare record. Admin entity schemas live with their entity types in
//! [`crate::state::forms`] and are listed here so the catalog can offer them.

use super::field::FieldDescriptor as F;
use super::form_schema::{Endpoint, FormRule, FormSchema};
use crate::state::{AccessLevel, AdminEntity, Location, Zone};

/// Slug of the volunteer registration form
pub const VOLUNTEER_SLUG: &str = "volunteer";

/// Value meaning "not available" for a tournament day
pub const NOT_AVAILABLE: &str = "not_available";

const APPLICATION_CONSENT: &str = "I confirm that all information provided is accurate and \
complete. I understand that providing false information may result in disqualification. \
I agree to the terms and conditions of the tournament and consent to the processing of my \
personal data in accordance with the privacy policy.";

const VOLUNTEER_CONSENT: &str = "I agree to the volunteer terms and conditions and consent \
to the processing of my personal data for the purpose of volunteer coordination.";

/// Slugs of the server-switchable application modules
pub const APPLICATION_MODULES: [&str; 5] = ["vendors", "media", "pro-am", "procurement", "jobs"];

fn application(slug: &str, title: &str, description: &str, fields: Vec<F>) -> FormSchema {
    FormSchema::new(
        slug,
        title,
        Endpoint::post(format!("/accreditation/apply/{slug}")),
    )
    .description(description)
    .fields(fields)
    .wrapped("form_data")
    .consent(APPLICATION_CONSENT)
    .module_gated()
}

fn vendors() -> FormSchema {
    application(
        "vendors",
        "Vendor & Supplier Accreditation",
        "Apply for vendor/supplier accreditation at the tournament",
        vec![
            F::text("company_name", "Company/Business Name").required(),
            F::select(
                "business_type",
                "Type of Business",
                &[
                    "Food & Beverage",
                    "Merchandise",
                    "Equipment Rental",
                    "Event Services",
                    "Transportation",
                    "Hospitality",
                    "Security",
                    "Cleaning Services",
                    "Other",
                ],
            )
            .required(),
            F::text("contact_person", "Contact Person Name").required(),
            F::text("contact_title", "Contact Person Title/Position").required(),
            F::email("email", "Email Address").required(),
            F::tel("phone", "Phone Number").required(),
            F::textarea("physical_address", "Physical Address").required(),
            F::text("postal_address", "Postal Address"),
            F::text("kra_pin", "KRA PIN Number").required(),
            F::text("business_registration", "Business Registration Number").required(),
            F::number("years_in_business", "Years in Business").required(),
            F::textarea("previous_events", "Previous Major Events Serviced")
                .placeholder("List major events you have previously provided services for"),
            F::textarea("products_services", "Products/Services Offered")
                .required()
                .placeholder("Describe the products or services you wish to offer"),
            F::number("staff_count", "Number of Staff to be Deployed").required(),
            F::textarea("space_requirements", "Space/Setup Requirements"),
            F::select(
                "insurance_coverage",
                "Do you have liability insurance?",
                &["Yes", "No", "Will Obtain"],
            )
            .required(),
            F::select(
                "health_certificate",
                "Health Certificate (for F&B)",
                &["Yes", "No", "Not Applicable"],
            ),
        ],
    )
}

fn media() -> FormSchema {
    application(
        "media",
        "Media Accreditation",
        "Apply for media/press accreditation to cover the tournament",
        vec![
            F::text("full_name", "Full Name").required(),
            F::select(
                "media_type",
                "Media Type",
                &[
                    "Print Journalist",
                    "Broadcast Journalist (TV)",
                    "Broadcast Journalist (Radio)",
                    "Photographer",
                    "Videographer",
                    "Online/Digital Media",
                    "Sports Blogger",
                    "Freelance",
                ],
            )
            .required(),
            F::text("organization", "Media Organization/Outlet").required(),
            F::text("job_title", "Job Title/Role").required(),
            F::email("email", "Email Address").required(),
            F::tel("phone", "Phone Number").required(),
            F::text("nationality", "Nationality").required(),
            F::text("passport_id", "Passport/ID Number").required(),
            F::textarea("organization_address", "Organization Address").required(),
            F::text("organization_website", "Organization Website"),
            F::text("social_media", "Social Media Handles").placeholder("@handle or profile URLs"),
            F::textarea("coverage_plan", "Coverage Plan")
                .required()
                .placeholder("Describe your planned coverage of the tournament"),
            F::textarea("equipment", "Equipment to be Used")
                .placeholder("List camera equipment, recording devices, etc."),
            F::textarea("previous_golf_coverage", "Previous Golf Event Coverage")
                .placeholder("List golf events you have previously covered"),
            F::select(
                "accreditation_days",
                "Days Requiring Accreditation",
                &[
                    "All Days (Thu-Sun)",
                    "Thursday Only",
                    "Friday Only",
                    "Saturday Only",
                    "Sunday Only",
                    "Thursday & Friday",
                    "Saturday & Sunday",
                    "Practice Days Only",
                ],
            )
            .required(),
            F::select("requires_parking", "Parking Required?", &["Yes", "No"]).required(),
            F::text("dietary_requirements", "Dietary Requirements"),
        ],
    )
}

fn pro_am() -> FormSchema {
    application(
        "pro-am",
        "Pro-Am Registration",
        "Register to participate in the tournament Pro-Am",
        vec![
            F::text("full_name", "Full Name").required(),
            F::email("email", "Email Address").required(),
            F::tel("phone", "Phone Number").required(),
            F::text("nationality", "Nationality").required(),
            F::text("passport_id", "Passport/ID Number").required(),
            F::number("handicap", "Official Golf Handicap")
                .required()
                .placeholder("Enter your handicap index"),
            F::text("home_club", "Home Golf Club").required(),
            F::select(
                "handicap_certificate",
                "Can you provide handicap certificate?",
                &["Yes", "No"],
            )
            .required(),
            F::text("company_name", "Company/Organization Name"),
            F::text("company_position", "Position/Title"),
            F::number("playing_experience", "Golf Playing Experience (Years)").required(),
            F::textarea("previous_proams", "Previous Pro-Am Participations")
                .placeholder("List Pro-Am events you have participated in"),
            F::select(
                "preferred_date",
                "Preferred Pro-Am Date",
                &[
                    "Wednesday (Main Pro-Am)",
                    "Tuesday (Practice Round)",
                    "Either Day",
                ],
            )
            .required(),
            F::number("guest_count", "Number of Guests Attending"),
            F::textarea("special_requests", "Special Requests or Requirements"),
            F::text("dietary_requirements", "Dietary Requirements"),
            F::select(
                "shirt_size",
                "Polo Shirt Size",
                &["XS", "S", "M", "L", "XL", "XXL", "XXXL"],
            )
            .required(),
            F::text("emergency_contact", "Emergency Contact Name").required(),
            F::tel("emergency_phone", "Emergency Contact Phone").required(),
        ],
    )
}

fn procurement() -> FormSchema {
    application(
        "procurement",
        "Procurement & Tender Applications",
        "Submit your tender or procurement application for the tournament",
        vec![
            F::text("company_name", "Company Name").required(),
            F::select(
                "tender_category",
                "Tender Category",
                &[
                    "Catering Services",
                    "Security Services",
                    "Transportation",
                    "Event Equipment",
                    "Tent & Marquee Rental",
                    "Furniture Rental",
                    "Audio Visual Equipment",
                    "Waste Management",
                    "Cleaning Services",
                    "Medical Services",
                    "Printing & Branding",
                    "IT & Technology",
                    "Other",
                ],
            )
            .required(),
            F::text("contact_person", "Contact Person").required(),
            F::text("designation", "Designation").required(),
            F::email("email", "Email Address").required(),
            F::tel("phone", "Phone Number").required(),
            F::textarea("physical_address", "Physical Address").required(),
            F::text("registration_number", "Company Registration Number").required(),
            F::text("kra_pin", "KRA PIN").required(),
            F::number("year_established", "Year Established").required(),
            F::select(
                "annual_turnover",
                "Annual Turnover (KES)",
                &[
                    "Below 1 Million",
                    "1-5 Million",
                    "5-10 Million",
                    "10-50 Million",
                    "Above 50 Million",
                ],
            )
            .required(),
            F::number("employee_count", "Number of Employees").required(),
            F::textarea("company_profile", "Company Profile/Description").required(),
            F::textarea("relevant_experience", "Relevant Experience & Past Projects").required(),
            F::textarea("certifications", "Certifications & Accreditations"),
            F::textarea("proposed_solution", "Proposed Solution/Approach")
                .required()
                .placeholder("Describe how you would deliver the required services"),
            F::textarea("references", "References (3 minimum)")
                .required()
                .placeholder("Provide contact details of at least 3 references"),
            F::select("agpo_registered", "AGPO Registered?", &["Yes", "No"]).required(),
            F::select(
                "women_youth_pwd",
                "Women/Youth/PWD Owned?",
                &["Women Owned", "Youth Owned", "PWD Owned", "Not Applicable"],
            ),
        ],
    )
}

fn jobs() -> FormSchema {
    application(
        "jobs",
        "Job Applications",
        "Apply for employment opportunities at the tournament",
        vec![
            F::text("full_name", "Full Name").required(),
            F::email("email", "Email Address").required(),
            F::tel("phone", "Phone Number").required(),
            F::text("nationality", "Nationality").required(),
            F::text("id_number", "National ID/Passport Number").required(),
            F::date("date_of_birth", "Date of Birth").required(),
            F::select(
                "gender",
                "Gender",
                &["Male", "Female", "Other", "Prefer not to say"],
            )
            .required(),
            F::textarea("physical_address", "Physical Address").required(),
            F::select(
                "position_applied",
                "Position Applied For",
                &[
                    "Event Coordinator",
                    "Guest Services",
                    "Hospitality Staff",
                    "Security Personnel",
                    "Transportation Coordinator",
                    "Media Liaison",
                    "VIP Services",
                    "Operations Assistant",
                    "Registration Desk",
                    "Merchandise Sales",
                    "Food & Beverage Service",
                    "Driver",
                    "Medical Staff",
                    "IT Support",
                    "General Support Staff",
                    "Other",
                ],
            )
            .required(),
            F::select(
                "employment_type",
                "Employment Type Preferred",
                &[
                    "Full Tournament (All Days)",
                    "Part-Time",
                    "Specific Days Only",
                ],
            )
            .required(),
            F::select(
                "education_level",
                "Highest Education Level",
                &[
                    "Primary",
                    "Secondary/High School",
                    "Certificate",
                    "Diploma",
                    "Bachelor's Degree",
                    "Master's Degree",
                    "PhD",
                ],
            )
            .required(),
            F::text("field_of_study", "Field of Study"),
            F::textarea("work_experience", "Relevant Work Experience")
                .required()
                .placeholder("Describe your relevant work experience"),
            F::textarea("event_experience", "Previous Event Experience")
                .placeholder("List any previous events you have worked at"),
            F::textarea("skills", "Key Skills")
                .required()
                .placeholder("List your key skills relevant to the position"),
            F::text("languages", "Languages Spoken")
                .required()
                .placeholder("e.g., English, Swahili, French"),
            F::select(
                "availability",
                "Availability",
                &[
                    "Immediately Available",
                    "Available from Feb 2026",
                    "1 Week Notice",
                    "2 Weeks Notice",
                    "1 Month Notice",
                ],
            )
            .required(),
            F::number("expected_salary", "Expected Daily Rate (KES)"),
            F::select(
                "has_uniform",
                "Do you have formal attire/uniform?",
                &["Yes", "No"],
            )
            .required(),
            F::text("emergency_contact", "Emergency Contact Name").required(),
            F::tel("emergency_phone", "Emergency Contact Phone").required(),
            F::select(
                "how_heard",
                "How did you hear about this opportunity?",
                &[
                    "Website",
                    "Social Media",
                    "Newspaper",
                    "Friend/Referral",
                    "Job Board",
                    "Other",
                ],
            ),
            F::textarea("additional_info", "Additional Information"),
        ],
    )
}

/// Tournament days a volunteer can be available on, with their record keys
pub const VOLUNTEER_DAYS: [(&str, &str); 4] = [
    ("availability_thursday", "Thursday, 19th February 2026"),
    ("availability_friday", "Friday, 20th February 2026"),
    ("availability_saturday", "Saturday, 21st February 2026"),
    ("availability_sunday", "Sunday, 22nd February 2026"),
];

const AVAILABILITY_OPTIONS: [&str; 4] = ["all_day", "morning", "afternoon", NOT_AVAILABLE];

fn volunteer() -> FormSchema {
    let mut fields = vec![
        F::text("first_name", "First Name").required(),
        F::text("last_name", "Last Name").required(),
        F::text("nationality", "Nationality"),
        F::text("identification_number", "ID/Passport Number"),
        F::text("golf_club", "Golf Club"),
        F::email("email", "Email Address").required(),
        F::tel("phone", "Phone Number").required(),
        F::select("role", "Volunteer Role", &["marshal", "scorer"]).required(),
        F::select(
            "volunteered_before",
            "Have you volunteered before?",
            &["Yes", "No"],
        ),
    ];
    fields.extend(VOLUNTEER_DAYS.iter().map(|(name, label)| {
        F::select(name, label, &AVAILABILITY_OPTIONS).initial(NOT_AVAILABLE)
    }));

    FormSchema::new(
        VOLUNTEER_SLUG,
        "Volunteer Registration",
        Endpoint::post("/volunteers/register"),
    )
    .description("Join the tournament as a volunteer marshal or scorer")
    .fields(fields)
    .consent(VOLUNTEER_CONSENT)
    .consent_field("consent_given")
    .rule(FormRule::AnyDiffers {
        fields: VOLUNTEER_DAYS.iter().map(|(name, _)| name.to_string()).collect(),
        value: NOT_AVAILABLE.to_string(),
        message: "Please select at least one day you are available".to_string(),
    })
}

/// Look up a schema by its slug
pub fn schema_for(slug: &str) -> Option<FormSchema> {
    match slug {
        VOLUNTEER_SLUG => Some(volunteer()),
        "vendors" => Some(vendors()),
        "media" => Some(media()),
        "pro-am" => Some(pro_am()),
        "procurement" => Some(procurement()),
        "jobs" => Some(jobs()),
        s if s == Location::SLUG => Some(Location::schema()),
        s if s == Zone::SLUG => Some(Zone::schema()),
        s if s == AccessLevel::SLUG => Some(AccessLevel::schema()),
        _ => None,
    }
}

/// Every built-in schema, public forms first
pub fn all() -> Vec<FormSchema> {
    vec![
        volunteer(),
        vendors(),
        media(),
        pro_am(),
        procurement(),
        jobs(),
        Location::schema(),
        Zone::schema(),
        AccessLevel::schema(),
    ]
}
