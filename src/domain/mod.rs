//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{Endpoint, Method, OtpRequest};
pub use response::{OtpResponse, RawResponse, ResponseData, ResponseType};
pub use validation::ValidationError;
pub use value::{
    AuthKey, MESSAGE_FIELD, MOBILE_FIELD, MessageTemplate, Otp, OtpExpiry, RetryType,
    SENDER_FIELD,
};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn auth_key_rejects_empty() {
        assert!(matches!(
            AuthKey::new("   "),
            Err(ValidationError::Empty {
                field: AuthKey::FIELD
            })
        ));
        assert_eq!(AuthKey::new(" key ").unwrap().as_str(), " key ");
    }

    #[test]
    fn auth_key_debug_is_redacted() {
        let key = AuthKey::new("secret-key").unwrap();
        assert!(!format!("{key:?}").contains("secret-key"));
    }

    #[test]
    fn default_template_is_fixed_sentence() {
        assert_eq!(
            MessageTemplate::default().as_str(),
            "Your otp is {{otp}}. Please do not share it with anybody"
        );
    }

    #[test]
    fn template_renders_first_placeholder_only() {
        let template = MessageTemplate::new("{{otp}} and {{otp}}");
        assert_eq!(template.render(&Otp::from(1234)), "1234 and {{otp}}");

        let plain = MessageTemplate::new("no placeholder here");
        assert_eq!(plain.render(&Otp::from(1234)), "no placeholder here");
    }

    #[test]
    fn generated_otp_stays_in_four_digit_range() {
        for _ in 0..1000 {
            let otp = Otp::generate();
            let value: u32 = otp.as_str().parse().unwrap();
            assert!((Otp::MIN..=Otp::MAX).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn caller_supplied_otp_is_not_validated() {
        assert_eq!(Otp::from("12").as_str(), "12");
        assert_eq!(Otp::from(123_456).as_str(), "123456");
    }

    #[test]
    fn retry_type_maps_voice_flag() {
        assert_eq!(RetryType::from_voice(true).as_str(), "voice");
        assert_eq!(RetryType::from_voice(false).as_str(), "text");
        assert_eq!(RetryType::default(), RetryType::Voice);
    }

    #[test]
    fn expiry_defaults_to_one_day() {
        assert_eq!(OtpExpiry::default().value(), 1440);
        assert_eq!(OtpExpiry::minutes(0).value(), 0);
    }

    #[test]
    fn endpoint_paths_match_msg91() {
        assert_eq!(Endpoint::SendOtp.path(), "sendotp.php");
        assert_eq!(Endpoint::RetryOtp.path(), "retryotp.php");
        assert_eq!(Endpoint::VerifyOtp.path(), "verifyRequestOTP.php");
        assert_eq!(Endpoint::Custom("x.php".to_owned()).path(), "x.php");
    }

    #[test]
    fn request_debug_hides_param_values() {
        let request = OtpRequest::get(Endpoint::VerifyOtp)
            .param(AuthKey::FIELD, "secret-key")
            .param(Otp::FIELD, "4321");
        let debug = format!("{request:?}");
        assert!(debug.contains("authkey"));
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("4321"));
        assert_eq!(request.get_param(Otp::FIELD), Some("4321"));
    }

    #[test]
    fn otp_new_keeps_value_verbatim() {
        assert_eq!(Otp::new("0042").as_str(), "0042");
        assert_eq!(Otp::new(String::from(" 12 ")).to_string(), " 12 ");
    }

    #[test]
    fn request_exposes_method_endpoint_and_params() {
        let request = OtpRequest::post(Endpoint::Custom("upload.php".to_owned()))
            .param("authkey", "k")
            .param("media", "x");
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.endpoint(), &Endpoint::Custom("upload.php".to_owned()));
        assert_eq!(
            request.params(),
            &[
                ("authkey".to_owned(), "k".to_owned()),
                ("media".to_owned(), "x".to_owned()),
            ]
        );
        assert_eq!(OtpRequest::get(Endpoint::SendOtp).method(), Method::Get);
        assert!(OtpRequest::get(Endpoint::SendOtp).params().is_empty());
    }

    #[test]
    fn raw_response_success_is_2xx() {
        let response = |status| RawResponse {
            status,
            status_text: String::new(),
            url: "https://control.msg91.com/api/sendotp.php".to_owned(),
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(299).is_success());
        assert!(!response(199).is_success());
        assert!(!response(300).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn response_data_json_accessors() {
        let data = ResponseData::Json(json!({"type": "success"}));
        assert_eq!(data.as_json(), Some(&json!({"type": "success"})));
        assert_eq!(data.into_json(), Some(json!({"type": "success"})));

        let raw = ResponseData::Raw("oops".to_owned());
        assert_eq!(raw.as_json(), None);
        assert_eq!(raw.into_json(), None);
        assert_eq!(ResponseData::None.into_json(), None);
    }

    #[test]
    fn otp_response_reads_message_and_type() {
        let payload = json!({"message": "3763646c3058373530393938", "type": "success"});
        let parsed = OtpResponse::from_payload(&payload).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.message, "3763646c3058373530393938");

        let payload = json!({"message": "otp_not_verified", "type": "error"});
        let parsed = OtpResponse::from_payload(&payload).unwrap();
        assert_eq!(parsed.kind, ResponseType::Error);

        assert!(OtpResponse::from_payload(&json!({})).is_err());
    }
}
