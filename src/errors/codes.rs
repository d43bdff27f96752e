/// Default label and message written for a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDefaults {
    /// HTTP status code
    pub code: u16,
    /// Status label, the same as the HTTP status message
    pub label: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Status used for the legacy reason-phrase annotation
pub const LEGACY_REASON_PHRASE_STATUS: u16 = 520;

/// Reason phrase sent with the legacy status unless the caller overrides it
pub const LEGACY_REASON_PHRASE: &str = "Datacenter Error";

static KNOWN_STATUSES: [StatusDefaults; 5] = [
    StatusDefaults {
        code: 400,
        label: "Bad Request",
        message: "Invalid request parameter.",
    },
    StatusDefaults {
        code: 401,
        label: "Unauthorized",
        message: "Invalid credentials",
    },
    StatusDefaults {
        code: 403,
        label: "Forbidden",
        message: "Insufficient authority",
    },
    StatusDefaults {
        code: 404,
        label: "Not Found",
        message: "Not Found",
    },
    StatusDefaults {
        code: 500,
        label: "Internal Server Error",
        message: "Internal Server Error",
    },
];

impl StatusDefaults {
    /// Look up the defaults for a status code.
    ///
    /// Unknown codes keep their numeric value but get empty label and message.
    pub fn lookup(code: u16) -> Self {
        KNOWN_STATUSES
            .iter()
            .find(|entry| entry.code == code)
            .copied()
            .unwrap_or(Self {
                code,
                label: "",
                message: "",
            })
    }

    /// 400 is the only status that carries a `details` array
    pub fn has_field_details(&self) -> bool {
        self.code == 400
    }
}
