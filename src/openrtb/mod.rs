//! The OpenRTB 2.5 bid request accepted by the auction pipeline.
//!
//! These types mirror the wire format field for field. They decode
//! leniently: a required scalar that is missing on the wire decodes to its
//! empty value so the engine can report it as a violation with a path,
//! instead of the decoder failing on the first one.

mod headers;
mod schema;
mod validator;

pub use headers::{
    check_headers, HeaderError, CONTENT_ENCODING_GZIP, CONTENT_ENCODING_HEADER, OPENRTB_VERSION,
    OPENRTB_VERSION_HEADER,
};
pub use schema::{bid_request_schema, DEVICE_MAKES, GENDERS};
pub use validator::{validate_request, RequestValidator};

use serde::{Deserialize, Serialize};

/// Root of a bid request.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidRequest {
    /// 1 marks a test auction that is not billable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<i64>,
    pub imp: Vec<Imp>,
    pub app: App,
    pub device: Device,
    pub format: Format,
    pub user: User,
    /// Maximum time in milliseconds the exchange allows for bids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmax: Option<i64>,
    pub ext: RequestExt,
}

/// Publisher credentials carried with every request.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestExt {
    pub api_key: String,
    pub session_id: String,
}

/// One ad slot being auctioned. Carries a banner, a video, or both.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Imp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    /// 1 = interstitial / full screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<Format>,
    /// Ad position: 0 unknown, 1 above the fold, 3 below the fold, 4 header,
    /// 5 footer, 6 sidebar, 7 full screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<i64>,
    /// Supported API frameworks; 3, 5 and 6 are MRAID 1, 2 and 3.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub api: Vec<i64>,
}

/// An in-stream video slot. Assumes VAST compliance.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mimes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minduration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxduration: Option<i64>,
    /// 2, 3 = VAST 2.0, 3.0; 5, 6 = their wrapper variants.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<i64>,
    pub w: i64,
    pub h: i64,
    /// 1 linear, 2 non-linear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linearity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipmin: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipafter: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub playbackmethod: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minbitrate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxbitrate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<i64>,
}

/// An allowed creative size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    pub w: i64,
    pub h: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct App {
    pub name: String,
    pub bundle: String,
    pub domain: String,
    pub storeurl: String,
    /// IAB content categories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cat: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    /// 0 free, 1 paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<i64>,
    pub publisher: Publisher,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publisher {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cat: Vec<String>,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<PublisherExt>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherExt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_app_id: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub ua: String,
    /// 1 when tracking must be limited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lmt: Option<i64>,
    pub ip: String,
    pub make: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<i64>,
    /// Advertising identifier. A value that is not a real IFA means the user
    /// opted out of tracking; only an empty one is rejected here.
    pub ifa: String,
}

/// What is known about the person behind the device. There is no consent
/// mechanism, so no `ext`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyeruid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yob: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_required_scalars_decode_to_empty() {
        let req: BidRequest = serde_json::from_value(json!({"imp": [{}]})).unwrap();
        assert_eq!(req.imp.len(), 1);
        assert!(req.imp[0].banner.is_none());
        assert!(req.device.ip.is_empty());
        assert_eq!(req.format.w, 0);
    }

    #[test]
    fn optional_fields_are_omitted_on_the_wire() {
        let imp = Imp {
            video: Some(Video {
                mimes: vec!["video/mp4".to_string()],
                w: 320,
                h: 480,
                skip: Some(0),
                ..Video::default()
            }),
            ..Imp::default()
        };
        let wire = serde_json::to_value(&imp).unwrap();
        assert_eq!(
            wire,
            json!({"video": {"mimes": ["video/mp4"], "w": 320, "h": 480, "skip": 0}})
        );
    }

    #[test]
    fn wire_names_are_preserved() {
        let wire = json!({
            "imp": [{"bidfloor": 0.5, "instl": 1, "banner": {"pos": 1}}],
            "app": {"storeurl": "https://store.example/app", "publisher": {"ext": {"facebook_app_id": "fb"}}},
            "device": {"connection_type": 2},
            "user": {"buyeruid": "b-1"},
            "ext": {"api_key": "k", "session_id": "s"}
        });
        let req: BidRequest = serde_json::from_value(wire).unwrap();
        assert_eq!(req.imp[0].bidfloor, Some(0.5));
        assert_eq!(req.app.storeurl, "https://store.example/app");
        assert_eq!(
            req.app.publisher.ext.as_ref().and_then(|e| e.facebook_app_id.as_deref()),
            Some("fb")
        );
        assert_eq!(req.device.connection_type, Some(2));
        assert_eq!(req.user.buyeruid.as_deref(), Some("b-1"));
        assert_eq!(req.ext.session_id, "s");
    }
}
