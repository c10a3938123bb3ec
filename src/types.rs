use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Reaction::Like),
            "dislike" => Some(Reaction::Dislike),
            _ => None,
        }
    }
}

// ---- users ----

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub age: i64,
    pub gender: Gender,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreated {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub age: i64,
    pub gender: Gender,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// ---- movies ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieBody {
    pub title: String,
    pub plot: String,
    pub playtime: i64,
    pub genre: Vec<String>,
    pub cast: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    pub plot: String,
    pub playtime: i64,
    pub genre: Vec<String>,
    pub cast: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListQuery {
    pub title: Option<String>,
    pub genre: Option<String>,
}

// ---- reviews ----

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewDto {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub title: String,
    pub content: String,
    pub review_image_url: Option<String>,
    pub created_at: String,
}

// ---- likes & reactions ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLikeDto {
    /// None when reporting "not liked" for a row that was never written.
    pub id: Option<i64>,
    pub user_id: i64,
    pub review_id: i64,
    pub is_liked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLikeCount {
    pub review_id: i64,
    pub like_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLikedStatus {
    pub review_id: i64,
    pub user_id: i64,
    pub is_liked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieReactionDto {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub reaction: Reaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieReactionCount {
    pub movie_id: i64,
    pub like_count: i64,
    pub dislike_count: i64,
}

// ---- follows ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowStatus {
    pub follower_id: i64,
    pub followee_id: i64,
    pub following: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowCounts {
    pub user_id: i64,
    pub follower_count: i64,
    pub following_count: i64,
}
