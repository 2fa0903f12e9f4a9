use crate::domain::StatusCode;

/// Plain-text response split into lines, with the status code taken from line 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainResponse {
    pub status_code: StatusCode,
    /// All lines, including the status line at index 0.
    pub lines: Vec<String>,
}

/// Split a response body into lines and read its status code.
///
/// Lines end at `\n` with an optional preceding `\r`; a trailing newline does not
/// start an extra empty line. Returns `None` for a body without any line.
pub fn decode_plain_response(body: &str) -> Option<PlainResponse> {
    let lines = body.lines().map(str::to_owned).collect::<Vec<_>>();
    let status_code = StatusCode::from_line(lines.first()?);
    Some(PlainResponse { status_code, lines })
}
