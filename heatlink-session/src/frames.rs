//! Fixed request and reply frames of the controller menu protocol
//!
//! All requests listed here are payloads: the transport prefixes the current
//! session token before sending, except for [`handshake::CONNECT_PROBE`]
//! which goes out before any token exists.
//!
//! Screen requests are all 14 bytes long. The byte values are taken as
//! observed on the wire; their inner structure is not needed to drive the
//! menu.

/// Connection establishment, in the order the frames are exchanged
pub mod handshake {
    /// Step 1 request, sent without a token
    pub const CONNECT_PROBE: [u8; 10] = [0x08, 0x00, 0x00, 0x00, 0x00, 0x01, 0x31, 0x32, 0x33, 0x34];
    /// Step 1 reply length
    pub const CONNECT_REPLY_LENGTH: usize = 7;
    /// Step 1 reply when another client already holds the session
    pub const DEVICE_BUSY: [u8; 7] = [0x08, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00];

    /// Step 2: unsolicited second datagram that establishes the token
    pub const GREETING_ACK_LENGTH: usize = 6;

    /// Step 3 request
    pub const CAPABILITY_REQUEST: [u8; 8] = [0xf0, 0x01, 0x16, 0x00, 0x01, 0x14, 0x00, 0x02];
    pub const CAPABILITY_REPLY_LENGTH: usize = 6;

    /// Step 4 request
    pub const NEGOTIATION: [u8; 19] = [
        0xf3, 0x00, 0x00, 0x03, 0x03, 0x04, 0x0e, 0xff, 0xff, 0xff, 0xff, 0x74, 0x56, 0x01, 0x00,
        0x56, 0x72, 0x41, 0xb5,
    ];
    /// Step 4 reply, compared byte for byte
    pub const NEGOTIATION_ACK: [u8; 10] = [0x01, 0xf7, 0x00, 0xf7, 0x00, 0xf7, 0x03, 0x00, 0x00, 0x00];

    /// Step 5 request
    pub const FINALIZE: [u8; 6] = [0xf7, 0x00, 0x01, 0x00, 0x00, 0x00];
    /// A finalize reply longer than this already carries main menu fields
    pub const FINALIZE_FIELDS_THRESHOLD: usize = 16;
}

/// No-op poll used to flush pending screen state before leaving a screen
pub const NOOP_POLL: [u8; 14] = [
    0x00, 0x0b, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0xd0, 0x1f, 0x00, 0x00,
];

/// Return to the main menu from a sub screen
pub const RETURN_TO_MAIN: [u8; 14] = [
    0x00, 0x02, 0x00, 0xff, 0x13, 0x00, 0xdd, 0x00, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
];

/// Reply length of a poll once the controller has settled on a screen
pub const SETTLED_REPLY_LENGTH: usize = 8;

/// Poll attempts before giving up on the settled reply
pub const DEFAULT_POLL_ATTEMPTS: usize = 4;

pub mod main_menu {
    /// Primes the controller cursor; without it the select is ignored
    pub const PROBE: [u8; 14] = [
        0x00, 0x16, 0x00, 0xff, 0x13, 0x00, 0xdd, 0x00, 0x00, 0x00, 0x83, 0x1f, 0x00, 0x00,
    ];
    pub const SELECT: [u8; 14] = [
        0x00, 0x02, 0x00, 0x1e, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
    ];
}

pub mod water {
    pub const PROBE: [u8; 14] = [
        0x00, 0x02, 0x00, 0xff, 0x7c, 0x00, 0x4a, 0x00, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
    ];
    pub const SELECT: [u8; 14] = [
        0x00, 0x14, 0x00, 0x20, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x61, 0x1f, 0x00, 0x00,
    ];
    pub const RETURN: [u8; 14] = [
        0x00, 0x02, 0x00, 0xff, 0x1c, 0x00, 0xdb, 0x00, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
    ];
    /// Return reply length that asks for a confirmation
    pub const CONFIRM_REPLY_LENGTH: usize = 55;
    pub const CONFIRM: [u8; 14] = [
        0x00, 0x0b, 0x00, 0x09, 0x1e, 0x00, 0xdb, 0x00, 0x00, 0x00, 0xd0, 0x1f, 0x00, 0x00,
    ];
}

pub mod solar {
    pub const PROBE: [u8; 14] = [
        0x00, 0x14, 0x00, 0xff, 0xc8, 0x00, 0x4a, 0x00, 0x00, 0x00, 0x61, 0x1f, 0x00, 0x00,
    ];
    pub const SELECT: [u8; 14] = [
        0x00, 0x02, 0x00, 0x1f, 0xc8, 0x00, 0x4a, 0x00, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
    ];
    /// Solar leaves through its own flush poll
    pub const FLUSH: [u8; 14] = [
        0x00, 0x55, 0x00, 0x1f, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x62, 0x1e, 0x00, 0x00,
    ];
    pub const CONFIRM_REPLY_LENGTH: usize = 125;
    pub const CONFIRM: [u8; 14] = [
        0x00, 0x13, 0x00, 0x01, 0x13, 0x00, 0xdd, 0x00, 0x00, 0x00, 0x8a, 0x1f, 0x00, 0x00,
    ];
}

pub mod boiler {
    pub const PROBE: [u8; 14] = [
        0x00, 0x14, 0x00, 0xff, 0x60, 0x01, 0x4a, 0x00, 0x00, 0x00, 0x61, 0x1f, 0x00, 0x00,
    ];
    pub const SELECT: [u8; 14] = [
        0x00, 0x02, 0x00, 0x21, 0x60, 0x01, 0x4a, 0x00, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
    ];
    /// Second page with the runtime counters
    pub const COUNTERS_PAGE: [u8; 14] = [
        0x00, 0x14, 0x00, 0x22, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x61, 0x1f, 0x00, 0x00,
    ];
}

pub mod buffer {
    pub const PROBE: [u8; 14] = [
        0x00, 0x14, 0x00, 0xff, 0x94, 0x01, 0x4a, 0x00, 0x00, 0x00, 0x61, 0x1f, 0x00, 0x00,
    ];
    pub const SELECT: [u8; 14] = [
        0x00, 0x02, 0x00, 0x23, 0x94, 0x01, 0x4a, 0x00, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
    ];
}

pub mod error {
    pub const PROBE: [u8; 14] = [
        0x00, 0x14, 0x00, 0xff, 0xf4, 0x01, 0x4a, 0x00, 0x00, 0x00, 0x61, 0x1f, 0x00, 0x00,
    ];
    pub const SELECT: [u8; 14] = [
        0x00, 0x02, 0x00, 0x24, 0xf4, 0x01, 0x4a, 0x00, 0x00, 0x00, 0xff, 0x1f, 0x00, 0x00,
    ];
}
