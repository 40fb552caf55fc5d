use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Profile summary returned by `/api/neynar/me`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NeynarMe {
    pub fid: u64,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub pfp_url: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub recent_casts: Vec<RecentCast>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecentCast {
    pub hash: String,
    pub text: String,
    pub timestamp: String,
}

impl NeynarMe {
    pub(crate) fn from_parts(user: ApiUser, casts: Vec<ApiCast>) -> Self {
        Self {
            fid: user.fid,
            username: user.username.unwrap_or_default(),
            display_name: user.display_name.unwrap_or_default(),
            bio: user
                .profile
                .and_then(|profile| profile.bio)
                .and_then(|bio| bio.text)
                .unwrap_or_default(),
            pfp_url: user.pfp_url.unwrap_or_default(),
            follower_count: user.follower_count.unwrap_or(0),
            following_count: user.following_count.unwrap_or(0),
            recent_casts: casts
                .into_iter()
                .map(|cast| RecentCast {
                    hash: cast.hash,
                    text: cast.text,
                    timestamp: cast.timestamp,
                })
                .collect(),
        }
    }
}

// Neynar v2 wire shapes, only the fields we read.

#[derive(Deserialize, Debug)]
pub(crate) struct BulkUsersResponse {
    #[serde(default)]
    pub users: Vec<ApiUser>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ApiUser {
    pub fid: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
    #[serde(default)]
    pub profile: Option<ApiProfile>,
    #[serde(default)]
    pub follower_count: Option<u64>,
    #[serde(default)]
    pub following_count: Option<u64>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ApiProfile {
    #[serde(default)]
    pub bio: Option<ApiBio>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ApiBio {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct FeedResponse {
    #[serde(default)]
    pub casts: Vec<ApiCast>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ApiCast {
    pub hash: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
}
