use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Url;

/// MyUCSC enrollment portal landing page.
pub const PORTAL_URL: &str = "https://my.ucsc.edu/";

const CLASS_SEARCH_PAGE: &str = "https://pisa.ucsc.edu/class_search/index.php";
const PROFESSOR_SEARCH_PAGE: &str = "https://www.ratemyprofessors.com/search/professors/1078";

/// Detail page for one section. The registrar page identifies a section by a
/// base64-wrapped PHP-serialized array of the term and class number, with each
/// string's byte length spelled out.
pub fn class_detail_url(term: &str, class_nbr: &str) -> String {
    let payload = format!(
        "a:2:{{s:5:\":STRM\";s:{}:\"{}\";s:10:\":CLASS_NBR\";s:{}:\"{}\";}}",
        term.len(),
        term,
        class_nbr.len(),
        class_nbr
    );
    format!(
        "{CLASS_SEARCH_PAGE}?action=detail&class_data={}",
        BASE64.encode(payload)
    )
}

/// RateMyProfessors search for an instructor. Listings name instructors
/// "Last, First"; the search query wants "First Last".
pub fn professor_search_url(instructor: &str) -> String {
    let query = match instructor.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => instructor.trim().to_string(),
    };
    let mut url = Url::parse(PROFESSOR_SEARCH_PAGE).expect("static professor search URL parses");
    url.query_pairs_mut().append_pair("q", &query);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_url_wraps_a_php_serialized_payload() {
        let url = class_detail_url("2248", "62549");
        let (page, data) = url
            .split_once("?action=detail&class_data=")
            .expect("detail URL carries the class_data parameter");
        assert_eq!(page, "https://pisa.ucsc.edu/class_search/index.php");

        let decoded = BASE64.decode(data).expect("class_data is valid base64");
        let payload = String::from_utf8(decoded).expect("payload is utf-8");
        assert_eq!(
            payload,
            "a:2:{s:5:\":STRM\";s:4:\"2248\";s:10:\":CLASS_NBR\";s:5:\"62549\";}"
        );
    }

    #[test]
    fn payload_lengths_track_the_actual_values() {
        let url = class_detail_url("224", "1234567");
        let (_, data) = url.split_once("class_data=").expect("parameter present");
        let payload =
            String::from_utf8(BASE64.decode(data).expect("valid base64")).expect("utf-8");
        assert_eq!(
            payload,
            "a:2:{s:5:\":STRM\";s:3:\"224\";s:10:\":CLASS_NBR\";s:7:\"1234567\";}"
        );
    }

    #[test]
    fn professor_search_flips_last_first_ordering() {
        let url = professor_search_url("Tantalo, Patrick");
        assert_eq!(
            url,
            "https://www.ratemyprofessors.com/search/professors/1078?q=Patrick+Tantalo"
        );
    }

    #[test]
    fn professor_search_passes_plain_names_through() {
        let url = professor_search_url("Sesh Venugopal");
        assert_eq!(
            url,
            "https://www.ratemyprofessors.com/search/professors/1078?q=Sesh+Venugopal"
        );
    }
}
