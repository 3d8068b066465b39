pub mod article;
pub mod help_request;
pub mod menu_item;
pub mod menu_item_review;
pub mod organization;
pub mod recommendation_request;

pub use article::{Article, ArticleParams};
pub use help_request::{HelpRequest, HelpRequestParams};
pub use menu_item::{MenuItem, MenuItemParams};
pub use menu_item_review::{MenuItemReview, MenuItemReviewParams};
pub use organization::{Organization, OrganizationParams};
pub use recommendation_request::{RecommendationRequest, RecommendationRequestParams};
