use crate::domain::Method;

/// Parameter whose presence switches a POST body to multipart.
const MEDIA_FIELD: &str = "media";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Parameters go in the URL query string.
    Query(Vec<(String, String)>),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` body, one text part per parameter.
    Multipart(Vec<(String, String)>),
}

pub fn encode_request(method: Method, params: Vec<(String, String)>) -> RequestBody {
    match method {
        Method::Get => RequestBody::Query(params),
        Method::Post if params.iter().any(|(key, _)| key == MEDIA_FIELD) => {
            RequestBody::Multipart(params)
        }
        Method::Post => RequestBody::Form(params),
    }
}
