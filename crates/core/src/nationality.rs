/// Sentinel reported when an MRZ issuing-country code is not in the table.
/// A looked-up-but-unknown code must stay distinguishable from "no MRZ
/// line at all", so the key is still set — to this value, never the raw code.
pub const UNRECOGNIZED_NATIONALITY: &str = "Nationality code not recognized.";

/// ICAO issuing-country code → display nationality, for the codes the
/// deployment actually sees.
pub fn nationality_name(code: &str) -> Option<&'static str> {
    match code {
        "GBR" => Some("BRITISH"),
        "CHN" => Some("HONG KONG"),
        "IND" => Some("INDIAN"),
        "USA" => Some("AMERICAN"),
        _ => None,
    }
}

/// Table lookup with the sentinel fallback.
pub fn nationality_or_sentinel(code: &str) -> &'static str {
    nationality_name(code).unwrap_or(UNRECOGNIZED_NATIONALITY)
}
