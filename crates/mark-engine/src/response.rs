//! Output side of a dispatch: status plus body text.

/// Response status set by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Ok,
    NotFound,
}

impl Status {
    /// Numeric HTTP status code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotFound => 404,
        }
    }
}

/// Destination for engine output.
///
/// A status may only be set before any body text has been written.
/// Hosts decide how output reaches the client.
pub trait ResponseSink {
    /// Whether output has already started.
    fn headers_sent(&self) -> bool;

    /// Set the response status. No-op once output has started.
    fn send_status(&mut self, status: Status);

    /// Append body text.
    fn write(&mut self, chunk: &str);
}

/// In-memory sink collecting the whole response.
#[derive(Clone, Debug, Default)]
pub struct BufferedResponse {
    status: Status,
    started: bool,
    body: String,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the buffer, returning status and body.
    pub fn into_parts(self) -> (Status, String) {
        (self.status, self.body)
    }
}

impl ResponseSink for BufferedResponse {
    fn headers_sent(&self) -> bool {
        self.started
    }

    fn send_status(&mut self, status: Status) {
        if !self.started {
            self.status = status;
        }
    }

    fn write(&mut self, chunk: &str) {
        self.started = true;
        self.body.push_str(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_status_ok() {
        let response = BufferedResponse::new();
        assert_eq!(response.status(), Status::Ok);
        assert!(!response.headers_sent());
    }

    #[test]
    fn test_status_before_body() {
        let mut response = BufferedResponse::new();
        response.send_status(Status::NotFound);
        response.write("missing");
        assert_eq!(response.into_parts(), (Status::NotFound, "missing".to_owned()));
    }

    #[test]
    fn test_status_ignored_after_body() {
        let mut response = BufferedResponse::new();
        response.write("<header>");
        assert!(response.headers_sent());
        response.send_status(Status::NotFound);
        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::NotFound.code(), 404);
    }
}
