//! End-to-end verification tests against known-good launch fixtures.

use std::collections::HashMap;

use lti_auth::canonical::{build_signature_base_string, percent_encode};
use lti_auth::{
    AuthError, HeaderValue, LaunchRequest, MemorySecretStore, compute_signature, verify_launch,
    verify_signature,
};

fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect()
}

fn raw_headers(pairs: &[(&str, &str)]) -> HashMap<String, HeaderValue> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), HeaderValue::Raw((*value).to_owned())))
        .collect()
}

fn store_with(secrets: &[(&str, &str)]) -> MemorySecretStore {
    MemorySecretStore::with_secrets(
        secrets
            .iter()
            .map(|(key, secret)| ((*key).to_owned(), (*secret).to_owned())),
    )
}

/// The basic example from the OAuth 1.0 signing tutorial: a GET request
/// with the OAuth parameters in the `Authorization` header.
fn tutorial_request() -> LaunchRequest {
    LaunchRequest {
        method: "GET".to_owned(),
        url: "http://photos.example.net/photos?size=original&file=vacation.jpg".to_owned(),
        headers: raw_headers(&[
            ("Host", "photos.example.net:80"),
            (
                "Authorization",
                r#"OAuth realm="http://photos.example.net/photos",
                    oauth_consumer_key="dpf43f3p2l4k3l03",
                    oauth_token="nnch734d00sl2jdk",
                    oauth_nonce="kllo9940pd9333jh",
                    oauth_timestamp="1191242096",
                    oauth_signature_method="HMAC-SHA1",
                    oauth_version="1.0",
                    oauth_signature="tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D""#,
            ),
        ]),
        get_params: string_map(&[("size", "original"), ("file", "vacation.jpg")]),
        post_params: HashMap::new(),
    }
}

fn tutorial_store() -> MemorySecretStore {
    store_with(&[
        ("dpf43f3p2l4k3l03", "kd94hf93k423kf44"),
        ("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00"),
    ])
}

/// The RFC 5849 example request (signature recalculated for the header's
/// full parameter set): POST body and query parameters sharing a name,
/// empty values, and an encoded `c@` key.
fn rfc_request() -> LaunchRequest {
    LaunchRequest {
        method: "POST".to_owned(),
        url: "http://example.com/request?b5=%3D%253D&a3=a&c%40=&a2=r%20b".to_owned(),
        headers: raw_headers(&[
            ("Host", "example.com"),
            ("Content-Type", "application/x-www-form-urlencoded"),
            (
                "Authorization",
                r#"OAuth realm="Example",
                    oauth_consumer_key="9djdj82h48djs9d2",
                    oauth_token="kkk9d7dh3k39sjv7",
                    oauth_signature_method="HMAC-SHA1",
                    oauth_timestamp="137131201",
                    oauth_nonce="7d8f3e4a",
                    oauth_version="1.0",
                    oauth_signature="OB33pYjWAnf%2BxtOHN4Gmbdil168%3D""#,
            ),
        ]),
        get_params: string_map(&[("b5", "=%3D"), ("a3", "a"), ("c@", ""), ("a2", "r b")]),
        post_params: string_map(&[("c2", ""), ("a3", "2 q")]),
    }
}

/// A webwork BasicLTI launch captured from a Blackboard Learn consumer,
/// with the OAuth parameters in the POST body.
fn webwork_request() -> LaunchRequest {
    LaunchRequest {
        method: "POST".to_owned(),
        url: "http://webworkdev1.elearning.ubc.ca:8080/webwork2/".to_owned(),
        headers: raw_headers(&[
            ("Host", "webworkdev1.elearning.ubc.ca:8080"),
            ("Content-Type", "application/x-www-form-urlencoded"),
        ]),
        get_params: HashMap::new(),
        post_params: webwork_post_params(),
    }
}

fn webwork_post_params() -> HashMap<String, String> {
    string_map(&[
        ("ext_lms", "learn-9.1.130093"),
        ("tool_consumer_instance_url", "http://137.82.12.84"),
        (
            "ext_ims_lis_resultvalue_sourcedids",
            "decimal,percentage,ratio,passfail,letteraf,letterafplus,freetext",
        ),
        ("oauth_consumer_key", "lti_secret"),
        ("tool_consumer_info_product_family_code", "learn"),
        ("oauth_signature", "cbxlc8O7Gzqo2rYBu+LvUyPp19c="),
        ("tool_consumer_instance_name", "ubc"),
        (
            "tool_consumer_instance_description",
            "University of British Columbia",
        ),
        ("context_id", "CL.UBC.MATH.101.201.2012W2.13204"),
        ("oauth_callback", "about:blank"),
        (
            "launch_presentation_return_url",
            "http://137.82.12.84/webapps/osc-BasicLTI-BBLEARN/return.jsp?id=webworkdev&course_id=_101_1&lti_page=ctools",
        ),
        ("oauth_version", "1.0"),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("roles", "Instructor"),
        (
            "lis_outcome_service_url",
            "http://137.82.12.84/webapps/osc-BasicLTI-BBLEARN/service",
        ),
        ("tool_consumer_instance_guid", "lti_secret"),
        ("lis_person_name_full", "John Hsu,ø"),
        ("context_label", "CL.UBC.MATH.101.201.2012W2.13204"),
        ("ext_ims_lis_memberships_id", ":_101_1::webworkdev:1423873410"),
        ("lti_version", "LTI-1p0"),
        ("user_id", ""),
        ("launch_presentation_document_target", "iframe"),
        ("oauth_timestamp", "1423873410"),
        (
            "context_title",
            "2012W2-MATH101-201- Integral Calculus with Applications to Physical Sciences and Engineering-Instructors",
        ),
        ("lis_person_sourcedid", "john"),
        ("resource_link_title", "webworkdev"),
        (
            "ext_ims_lis_memberships_url",
            "http://137.82.12.84/webapps/osc-BasicLTI-BBLEARN/extension",
        ),
        ("oauth_nonce", "12997106392824"),
        (
            "lis_course_offering_sourcedid",
            "CL.UBC.MATH.101.201.2012W2.13204",
        ),
        ("lti_message_type", "basic-lti-launch-request"),
        ("tool_consumer_info_version", "9.1.130093"),
        ("launch_presentation_locale", "en_GB"),
        ("lis_person_name_family", "Hsu,ø"),
        ("lis_person_name_given", "John"),
        (
            "ext_ims_lis_basic_outcome_url",
            "http://137.82.12.84/webapps/osc-BasicLTI-BBLEARN/extension",
        ),
        ("context_type", "CourseSection"),
        (
            "lis_course_section_sourcedid",
            "CL.UBC.MATH.101.201.2012W2.13204",
        ),
        ("resource_link_id", "CL.UBC.MATH.101.201.2012W2.13204"),
    ])
}

fn webwork_store() -> MemorySecretStore {
    store_with(&[("lti_secret", "secret")])
}

/// Sign `request` in place: collect its signed parameters, build the base
/// string, and store the computed signature in the given source map.
fn sign_into_post(request: &mut LaunchRequest, consumer_secret: &str) {
    let params: Vec<(String, String)> = request
        .get_params
        .iter()
        .chain(&request.post_params)
        .filter(|(name, _)| *name != "oauth_signature")
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let base_string =
        build_signature_base_string(&request.method, &request.url, &params).unwrap();
    let signing_key = format!("{}&", percent_encode(consumer_secret));
    let signature = compute_signature(&signing_key, &base_string);

    request
        .post_params
        .insert("oauth_signature".to_owned(), signature);
}

#[test]
fn test_should_verify_tutorial_example_with_header_params() {
    let verified = verify_signature(&tutorial_request(), &tutorial_store()).unwrap();
    assert!(verified);
}

#[test]
fn test_should_reject_tampered_signature() {
    let mut request = tutorial_request();
    let Some(HeaderValue::Raw(auth)) = request.headers.get("Authorization") else {
        panic!("fixture must carry a raw Authorization header");
    };
    let tampered = auth.replace("tR3%2B", "uR3%2B");
    request
        .headers
        .insert("Authorization".to_owned(), HeaderValue::Raw(tampered));

    let verified = verify_signature(&request, &tutorial_store()).unwrap();
    assert!(!verified);
}

#[test]
fn test_should_reject_wrong_consumer_secret() {
    let store = store_with(&[
        ("dpf43f3p2l4k3l03", "wrong-secret"),
        ("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00"),
    ]);

    let verified = verify_signature(&tutorial_request(), &store).unwrap();
    assert!(!verified);
}

#[test]
fn test_should_verify_rfc5849_example_with_duplicate_param_names() {
    let store = store_with(&[
        ("9djdj82h48djs9d2", "j49sk3j29djd"),
        ("kkk9d7dh3k39sjv7", "dh893hdasih9"),
    ]);

    let verified = verify_signature(&rfc_request(), &store).unwrap();
    assert!(verified);
}

#[test]
fn test_should_verify_webwork_launch_with_post_params() {
    let verified = verify_signature(&webwork_request(), &webwork_store()).unwrap();
    assert!(verified);
}

#[test]
fn test_should_accept_webwork_launch_message() {
    let verified = verify_launch(&webwork_request(), &webwork_store()).unwrap();
    assert!(verified);
}

#[test]
fn test_should_reject_launch_with_valid_signature_but_missing_fields() {
    let mut request = webwork_request();
    request.post_params.remove("resource_link_id");
    sign_into_post(&mut request, "secret");

    // The signature itself is good for the reduced body...
    assert!(verify_signature(&request, &webwork_store()).unwrap());
    // ...but the body is no longer a valid launch message.
    assert!(!verify_launch(&request, &webwork_store()).unwrap());
}

#[test]
fn test_should_prefer_post_params_when_both_sources_hold_oauth_fields() {
    let mut request = LaunchRequest {
        method: "POST".to_owned(),
        url: "http://tool.example.edu/launch".to_owned(),
        headers: HashMap::new(),
        get_params: string_map(&[
            ("oauth_consumer_key", "consumer"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1191242096"),
            ("oauth_nonce", "get-nonce"),
            ("oauth_signature", "bogus-get-signature"),
        ]),
        post_params: string_map(&[
            ("oauth_consumer_key", "consumer"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1191242096"),
            ("oauth_nonce", "post-nonce"),
        ]),
    };

    sign_into_post(&mut request, "consumer-secret");
    let store = store_with(&[("consumer", "consumer-secret")]);

    // POST wins: the POST-set signature is the one compared, while the GET
    // entries (bogus signature excluded) still fold into the base string.
    let verified = verify_signature(&request, &store).unwrap();
    assert!(verified);
}

#[test]
fn test_should_verify_get_located_params_roundtrip() {
    let url = "http://tool.example.edu/launch";
    let mut get_params = string_map(&[
        ("oauth_consumer_key", "webwork"),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", "1423873410"),
        ("oauth_nonce", "12997106392824"),
        ("custom_section", "MATH101"),
    ]);

    let params: Vec<(String, String)> = get_params
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    let base_string = build_signature_base_string("GET", url, &params).unwrap();
    let signing_key = format!("{}&", percent_encode("top-secret"));
    let signature = compute_signature(&signing_key, &base_string);
    get_params.insert("oauth_signature".to_owned(), signature);

    let request = LaunchRequest {
        method: "GET".to_owned(),
        url: url.to_owned(),
        headers: HashMap::new(),
        get_params,
        post_params: HashMap::new(),
    };

    let verified = verify_signature(&request, &store_with(&[("webwork", "top-secret")])).unwrap();
    assert!(verified);
}

#[test]
fn test_should_fail_when_no_source_holds_oauth_fields() {
    let request = LaunchRequest {
        method: "GET".to_owned(),
        url: "http://tool.example.edu/launch".to_owned(),
        headers: HashMap::new(),
        get_params: string_map(&[("size", "original")]),
        post_params: HashMap::new(),
    };

    let result = verify_signature(&request, &MemorySecretStore::new());
    assert!(matches!(result, Err(AuthError::OAuthFieldsNotFound)));
}

#[test]
fn test_should_fail_on_unparsable_request_url() {
    let mut request = webwork_request();
    request.url = "not a url".to_owned();

    let result = verify_signature(&request, &webwork_store());
    assert!(matches!(result, Err(AuthError::InvalidRequestUrl(_))));
}

#[test]
fn test_should_return_same_verdict_on_repeated_verification() {
    let request = tutorial_request();
    let store = tutorial_store();

    let first = verify_signature(&request, &store).unwrap();
    let second = verify_signature(&request, &store).unwrap();
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn test_should_treat_unknown_consumer_as_empty_secret() {
    // An unknown consumer key degrades to an empty secret, so verification
    // completes and reports a mismatch rather than erroring.
    let verified = verify_signature(&tutorial_request(), &MemorySecretStore::new()).unwrap();
    assert!(!verified);
}
