/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Generates consuming builder setters that store a value on the current stage
macro_rules! transformation_setters {
    ( $( $(#[$doc:meta])* $name:ident => $key:literal ),* $(,)? ) => {
        $(
            $(#[$doc])*
            pub fn $name(self, value: impl Into<ParamValue>) -> Self {
                self.param($key, value)
            }
        )*
    };
}

// Sends the prepared request and parses the response into the given record
macro_rules! call_action {
    ( $api:expr, $method:expr, $action:expr, $params:expr, $rt:ty) => {{
        $params.check()?;
        let url = $api
            .api_url_v()
            .resource_type($params.resource_type())
            .action($action)
            .build()?;
        let params = $api.prepare_params($params.to_params());
        $api.call::<$rt>($method, &url, params, $params.file())
    }};
}

pub(crate) use {call_action, transformation_setters};
