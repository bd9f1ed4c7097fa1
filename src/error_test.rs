use super::*;

#[test]
fn error_codes_are_stable() {
    assert_eq!(SimError::UnknownKind("x".into()).error_code(), "E_UNKNOWN_KIND");
    assert_eq!(SimError::ConfigParse("x".into()).error_code(), "E_CONFIG_PARSE");
    assert_eq!(SimError::Render("x".into()).error_code(), "E_RENDER");
    assert_eq!(SimError::Serialize("x".into()).error_code(), "E_SERIALIZE");
    assert_eq!(SimError::NoWindow.error_code(), "E_NO_WINDOW");
}

#[test]
fn messages_name_the_input() {
    assert_eq!(SimError::UnknownKind("orbit".into()).to_string(), "unknown simulation kind: orbit");
    assert_eq!(SimError::NoWindow.to_string(), "no browser window available");
}
