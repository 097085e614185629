pub mod post;
pub mod user;

pub use post::{CreatePostRequest, FeedPost, Post};
pub use user::{
    LoginRequest, NewUser, RegisterRequest, UpdateUserRequest, User, UserPatch, VerifyTokenRequest,
};
