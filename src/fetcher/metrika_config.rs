//! Logs API configuration
//!
//! Endpoint templates and per-source field lists are plain data. Supporting a
//! new source means adding a [`SourceProfile`] to [`SOURCE_PROFILES`], not
//! another branch in the request code.
//!
//! Field reference: <https://yandex.ru/dev/metrika/ru/logs/fields/visits>

use std::time::Duration;

use crate::Source;

/// Connection establishment timeout for a single API call
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Whole-request timeout; export parts can be hundreds of megabytes
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Endpoint layout of the Logs API
#[derive(Debug, Clone)]
pub struct MetrikaApiConfig {
    /// Scheme and host (e.g., <https://api-metrika.yandex.net>)
    pub base_url: &'static str,

    /// Create log request; `{counter_id}` placeholder
    pub create_endpoint: &'static str,

    /// Log request status; `{counter_id}`, `{request_id}` placeholders
    pub status_endpoint: &'static str,

    /// Part download; `{counter_id}`, `{request_id}`, `{part}` placeholders
    pub download_endpoint: &'static str,

    /// Clean log request; `{counter_id}`, `{request_id}` placeholders
    pub clean_endpoint: &'static str,

    /// Authorization scheme placed before the token
    pub auth_scheme: &'static str,
}

impl MetrikaApiConfig {
    /// Path for creating a log request (without query)
    pub fn create_path(&self, counter_id: &str) -> String {
        self.create_endpoint.replace("{counter_id}", counter_id)
    }

    /// Path for checking a log request
    pub fn status_path(&self, counter_id: &str, request_id: &str) -> String {
        fill(self.status_endpoint, counter_id, request_id)
    }

    /// Path for downloading one part of a processed log request
    pub fn download_path(&self, counter_id: &str, request_id: &str, part: u32) -> String {
        fill(self.download_endpoint, counter_id, request_id).replace("{part}", &part.to_string())
    }

    /// Path for cleaning a log request
    pub fn clean_path(&self, counter_id: &str, request_id: &str) -> String {
        fill(self.clean_endpoint, counter_id, request_id)
    }

    /// Value of the `Authorization` header for `token`
    pub fn authorization(&self, token: &str) -> String {
        format!("{} {}", self.auth_scheme, token)
    }
}

fn fill(template: &str, counter_id: &str, request_id: &str) -> String {
    template
        .replace("{counter_id}", counter_id)
        .replace("{request_id}", request_id)
}

/// Yandex Metrika management API, Logs API v1
pub const METRIKA_LOGS_API: MetrikaApiConfig = MetrikaApiConfig {
    base_url: "https://api-metrika.yandex.net",
    create_endpoint: "/management/v1/counter/{counter_id}/logrequests",
    status_endpoint: "/management/v1/counter/{counter_id}/logrequest/{request_id}",
    download_endpoint:
        "/management/v1/counter/{counter_id}/logrequest/{request_id}/part/{part}/download",
    clean_endpoint: "/management/v1/counter/{counter_id}/logrequest/{request_id}/clean",
    auth_scheme: "OAuth",
};

/// Fields requested for one source kind
#[derive(Debug, Clone)]
pub struct SourceProfile {
    /// Source this profile belongs to
    pub source: Source,
    /// Ordered field list sent as the `fields` parameter
    pub fields: &'static [&'static str],
}

impl SourceProfile {
    /// Comma-joined field list as the API expects it
    pub fn fields_param(&self) -> String {
        self.fields.join(",")
    }
}

/// Session-level fields exported for the `visits` source
pub const VISITS_FIELDS: &[&str] = &[
    // Visit
    "ym:s:visitID",
    "ym:s:dateTime",
    "ym:s:date",
    "ym:s:dateTimeUTC",
    "ym:s:clientTimeZone",
    // User
    "ym:s:clientID",
    "ym:s:counterID",
    "ym:s:isNewUser",
    "ym:s:ipAddress",
    "ym:s:regionCountry",
    "ym:s:regionCity",
    // Device
    "ym:s:deviceCategory",
    "ym:s:browser",
    // UTM
    "ym:s:firstUTMSource",
    "ym:s:lastUTMSource",
    "ym:s:lastsignUTMSource",
    "ym:s:last_yandex_direct_clickUTMSource",
    "ym:s:firstUTMMedium",
    "ym:s:lastUTMMedium",
    "ym:s:lastsignUTMMedium",
    "ym:s:last_yandex_direct_clickUTMMedium",
    "ym:s:firstUTMCampaign",
    "ym:s:lastUTMCampaign",
    "ym:s:lastsignUTMCampaign",
    "ym:s:last_yandex_direct_clickUTMCampaign",
    "ym:s:firstUTMContent",
    "ym:s:lastUTMContent",
    "ym:s:lastsignUTMContent",
    "ym:s:last_yandex_direct_clickUTMContent",
    "ym:s:firstUTMTerm",
    "ym:s:lastUTMTerm",
    "ym:s:lastsignUTMTerm",
    "ym:s:last_yandex_direct_clickUTMTerm",
    // Traffic source
    "ym:s:firstTrafficSource",
    "ym:s:lastTrafficSource",
    "ym:s:lastsignTrafficSource",
    "ym:s:last_yandex_direct_clickTrafficSource",
    "ym:s:firstReferalSource",
    "ym:s:lastReferalSource",
    "ym:s:lastsignReferalSource",
    "ym:s:last_yandex_direct_clickReferalSource",
    "ym:s:firstSearchEngineRoot",
    "ym:s:lastSearchEngineRoot",
    "ym:s:lastsignSearchEngineRoot",
    "ym:s:last_yandex_direct_clickSearchEngineRoot",
    "ym:s:firstSocialNetwork",
    "ym:s:lastSocialNetwork",
    "ym:s:lastsignSocialNetwork",
    "ym:s:last_yandex_direct_clickSocialNetwork",
    "ym:s:firstSocialNetworkProfile",
    "ym:s:lastSocialNetworkProfile",
    "ym:s:lastsignSocialNetworkProfile",
    "ym:s:last_yandex_direct_clickSocialNetworkProfile",
    "ym:s:firstRecommendationSystem",
    "ym:s:lastRecommendationSystem",
    "ym:s:lastsignRecommendationSystem",
    "ym:s:last_yandex_direct_clickRecommendationSystem",
    "ym:s:firstMessenger",
    "ym:s:lastMessenger",
    "ym:s:lastsignMessenger",
    "ym:s:last_yandex_direct_clickMessenger",
    // Visit params
    "ym:s:referer",
    "ym:s:startURL",
    "ym:s:endURL",
    "ym:s:pageViews",
    "ym:s:visitDuration",
    "ym:s:bounce",
    "ym:s:parsedParamsKey1",
    "ym:s:parsedParamsKey2",
    "ym:s:parsedParamsKey3",
    "ym:s:watchIDs",
    "ym:s:goalsID",
    "ym:s:goalsSerialNumber",
    "ym:s:goalsDateTime",
    "ym:s:goalsPrice",
    "ym:s:goalsOrder",
];

/// Sources that can be requested. `hits` has no profile yet.
pub const SOURCE_PROFILES: &[SourceProfile] = &[SourceProfile {
    source: Source::Visits,
    fields: VISITS_FIELDS,
}];

/// Look up the profile for `source`; `None` means the source is unsupported
pub fn source_profile(source: Source) -> Option<&'static SourceProfile> {
    SOURCE_PROFILES.iter().find(|p| p.source == source)
}
