/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use cloudinary::v1_1::{
    Account, ApiRequest, Cloudinary, CloudinaryError, RawResponse, Transport,
};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Client for the "testcloud" account used throughout the tests
#[allow(dead_code)]
pub(crate) fn test_cloudinary() -> anyhow::Result<Cloudinary> {
    init_logging();
    Ok(Cloudinary::from_account(Account::new("testcloud", "1234", "abcd"))?)
}

/// Transport answering every request with the same canned response
#[allow(dead_code)]
pub(crate) struct MockTransport {
    status: u16,
    body: String,
    pub(crate) requests: Mutex<Vec<ApiRequest>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub(crate) fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, CloudinaryError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(RawResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

// Client wired to a mock transport
#[allow(dead_code)]
pub(crate) fn mocked_cloudinary(
    status: u16,
    body: &str,
) -> anyhow::Result<(Cloudinary, Arc<MockTransport>)> {
    let transport = MockTransport::new(status, body);
    let cloudinary = test_cloudinary()?.with_transport(transport.clone());
    Ok((cloudinary, transport))
}
