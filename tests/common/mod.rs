//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use bidcheck::openrtb::{
    App, BidRequest, Device, Format, Imp, Publisher, PublisherExt, RequestExt, User, Video,
};

pub const API_KEY: &str = "550e8400-e29b-41d4-a716-446655440000";

pub fn video() -> Video {
    Video {
        mimes: vec!["video/mp4".to_string()],
        minduration: Some(5),
        maxduration: Some(30),
        protocols: vec![2, 3],
        w: 320,
        h: 480,
        linearity: Some(1),
        skip: Some(0),
        skipmin: Some(0),
        skipafter: Some(5),
        playbackmethod: vec![1, 2],
        minbitrate: Some(300),
        maxbitrate: Some(1500),
        pos: Some(7),
    }
}

/// A request every check accepts: one video impression, full app context.
pub fn valid_request() -> BidRequest {
    BidRequest {
        test: Some(0),
        imp: vec![Imp {
            banner: None,
            video: Some(video()),
            instl: Some(1),
            bidfloor: Some(0.5),
        }],
        app: App {
            name: "Stories".to_string(),
            bundle: "com.example.stories".to_string(),
            domain: "example.com".to_string(),
            storeurl: "https://apps.apple.com/app/id123456".to_string(),
            cat: vec!["IAB1".to_string()],
            ver: Some("9.1.0".to_string()),
            paid: Some(0),
            publisher: Publisher {
                name: "Example Media".to_string(),
                cat: vec!["IAB1".to_string()],
                domain: "example.com".to_string(),
                ext: Some(PublisherExt {
                    facebook_app_id: Some("1234567890".to_string()),
                }),
            },
        },
        device: Device {
            ua: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".to_string(),
            lmt: Some(0),
            ip: "10.0.0.1".to_string(),
            make: "Apple".to_string(),
            model: Some("iPhone".to_string()),
            os: Some("iOS".to_string()),
            osv: Some("17.0".to_string()),
            connection_type: Some(2),
            ifa: "6D92078A-8246-4BA4-AE5B-76104861E7DC".to_string(),
        },
        format: Format { w: 320, h: 480 },
        user: User {
            age: Some(29),
            buyeruid: Some("buyer-42".to_string()),
            yob: Some(1995),
            gender: Some("female".to_string()),
        },
        tmax: Some(500),
        ext: RequestExt {
            api_key: API_KEY.to_string(),
            session_id: "session-1".to_string(),
        },
    }
}
