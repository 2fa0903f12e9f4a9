use crate::domain::SmsId;

pub fn encode_check_status_query(id: &SmsId) -> Vec<(String, String)> {
    vec![(SmsId::FIELD.to_owned(), id.as_str().to_owned())]
}
