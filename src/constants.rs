/// List type identifiers, as carried on inbound publication events.
pub const CIVIL_AND_FAMILY_DAILY_CAUSE_LIST: &str = "CIVIL_AND_FAMILY_DAILY_CAUSE_LIST";
pub const BIRMINGHAM_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST: &str =
    "BIRMINGHAM_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST";
pub const LEEDS_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST: &str =
    "LEEDS_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST";
pub const BRISTOL_AND_CARDIFF_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST: &str =
    "BRISTOL_AND_CARDIFF_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST";
pub const MANCHESTER_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST: &str =
    "MANCHESTER_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST";
pub const COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST: &str = "COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST";
pub const CST_WEEKLY_HEARING_LIST: &str = "CST_WEEKLY_HEARING_LIST";
pub const PHT_WEEKLY_HEARING_LIST: &str = "PHT_WEEKLY_HEARING_LIST";
pub const SJP_PUBLIC_LIST: &str = "SJP_PUBLIC_LIST";
pub const SJP_PRESS_LIST: &str = "SJP_PRESS_LIST";

// Placeholder for descriptive text the publisher left blank
pub const NOT_APPLICABLE: &str = "N/A";

/// Substituted for every case line of a digest built from a special category list.
pub const SPECIAL_CATEGORY_DATA_WARNING: &str = "Note: this email contains Special Category Data as defined by the Data Protection Act 2018, formally known as Sensitive Personal Data, and should be handled appropriately.";

pub const SPECIAL_CATEGORY_NOTICE_LABEL: &str = "Notice";

/// Every list type the standard registry knows about.
pub fn get_supported_list_types() -> Vec<&'static str> {
    vec![
        CIVIL_AND_FAMILY_DAILY_CAUSE_LIST,
        BIRMINGHAM_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        LEEDS_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        BRISTOL_AND_CARDIFF_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        MANCHESTER_ADMINISTRATIVE_COURT_DAILY_CAUSE_LIST,
        COURT_OF_APPEAL_CIVIL_DAILY_CAUSE_LIST,
        CST_WEEKLY_HEARING_LIST,
        PHT_WEEKLY_HEARING_LIST,
        SJP_PUBLIC_LIST,
        SJP_PRESS_LIST,
    ]
}
