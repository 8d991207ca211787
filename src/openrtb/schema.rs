//! Constraint tables for the bid request entity graph.
//!
//! The graph is built once, on first use, and shared read-only by every
//! validation afterwards.

use std::sync::LazyLock;

use crate::schema::{CrossFieldRule, Membership, ObjectSchema, Schema};

/// Accepted `device.make` values, matched case-insensitively.
pub const DEVICE_MAKES: [&str; 2] = ["Apple", "Android"];

/// Accepted `user.gender` values, matched case-insensitively.
pub const GENDERS: [&str; 5] = ["M", "F", "O", "Male", "Female"];

/// Banner API frameworks (VPAID 1/2, MRAID 1/2/3, ORMMA).
const API_FRAMEWORKS: [i64; 6] = [1, 2, 3, 4, 5, 6];
/// VAST 2.0, 3.0 and their wrappers.
const VIDEO_PROTOCOLS: [i64; 4] = [2, 3, 5, 6];
const PLAYBACK_METHODS: [i64; 6] = [1, 2, 3, 4, 5, 6];

static BID_REQUEST: LazyLock<ObjectSchema> = LazyLock::new(bid_request);

/// The root schema node for [`BidRequest`](super::BidRequest).
pub fn bid_request_schema() -> &'static ObjectSchema {
    &BID_REQUEST
}

fn bid_request() -> ObjectSchema {
    Schema::object("BidRequest")
        .optional("test", Schema::int_range(0, 1))
        .field("imp", Schema::array(imp()).non_empty())
        .field("app", app())
        .field("device", device())
        .field("format", format())
        .field("user", user())
        .optional("tmax", Schema::non_negative_int())
        .field("ext", request_ext())
}

fn request_ext() -> ObjectSchema {
    Schema::object("RequestExt")
        .field("api_key", Schema::uuid_v4())
        .field("session_id", Schema::string())
}

fn imp() -> ObjectSchema {
    Schema::object("Imp")
        .optional("banner", banner())
        .optional("video", video())
        .optional("instl", Schema::int_range(0, 1))
        .optional("bidfloor", Schema::non_negative_number())
        .rule(CrossFieldRule::at_least_one_of(
            ["banner", "video"],
            "impression must declare banner or video",
        ))
}

fn banner() -> ObjectSchema {
    Schema::object("Banner")
        .optional("format", Schema::array(format()))
        .optional("pos", Schema::int_range(0, 7))
        .optional(
            "api",
            Schema::int_array_enum(API_FRAMEWORKS, Membership::All),
        )
}

fn video() -> ObjectSchema {
    Schema::object("Video")
        .field("mimes", Schema::string_array())
        .optional("minduration", Schema::non_negative_int())
        .optional("maxduration", Schema::non_negative_int())
        .optional(
            "protocols",
            Schema::int_array_enum(VIDEO_PROTOCOLS, Membership::All),
        )
        .field("w", Schema::positive_int())
        .field("h", Schema::positive_int())
        .optional("linearity", Schema::int_range(1, 2))
        .optional("skip", Schema::int_range(0, 1))
        .optional("skipmin", Schema::non_negative_int())
        .optional("skipafter", Schema::non_negative_int())
        .optional(
            "playbackmethod",
            Schema::int_array_enum(PLAYBACK_METHODS, Membership::All),
        )
        .optional("minbitrate", Schema::non_negative_int())
        .optional("maxbitrate", Schema::non_negative_int())
        .optional("pos", Schema::int_range(0, 7))
        .rule(CrossFieldRule::not_greater_than("minduration", "maxduration"))
        .rule(CrossFieldRule::not_greater_than("minbitrate", "maxbitrate"))
}

fn format() -> ObjectSchema {
    Schema::object("Format")
        .field("w", Schema::positive_int())
        .field("h", Schema::positive_int())
}

fn app() -> ObjectSchema {
    Schema::object("App")
        .field("name", Schema::string())
        .field("bundle", Schema::string())
        .field("domain", Schema::string())
        .field("storeurl", Schema::string())
        .field("cat", Schema::string_array())
        .optional("ver", Schema::string())
        .optional("paid", Schema::int_range(0, 1))
        .field("publisher", publisher())
}

fn publisher() -> ObjectSchema {
    Schema::object("Publisher")
        .field("name", Schema::string())
        .optional("cat", Schema::string_array())
        .field("domain", Schema::string())
        .optional(
            "ext",
            Schema::object("PublisherExt").optional("facebook_app_id", Schema::string()),
        )
}

fn device() -> ObjectSchema {
    Schema::object("Device")
        .field("ua", Schema::string())
        .optional("lmt", Schema::int_range(0, 1))
        .field("ip", Schema::ipv4())
        .field("make", Schema::string_enum(DEVICE_MAKES, true))
        .optional("model", Schema::string())
        .optional("os", Schema::string())
        .optional("osv", Schema::string())
        .optional("connection_type", Schema::integer())
        .field("ifa", Schema::string())
}

fn user() -> ObjectSchema {
    Schema::object("User")
        .optional("age", Schema::integer())
        .optional("buyeruid", Schema::string())
        .optional("yob", Schema::integer())
        .optional("gender", Schema::string_enum(GENDERS, true))
}
