use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::policy::AccessPolicy;
use crate::database::entity::{Entity, EntityId, EntityMeta, KeyKind, PgQueryAs};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReview {
    #[serde(default)]
    pub id: i64,
    /// Id of the reviewed menu item. Not checked against the menu item table.
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemReviewParams {
    pub item_id: i64,
    pub reviewer_email: String,
    pub stars: i32,
    pub date_reviewed: NaiveDateTime,
    pub comments: String,
}

impl Entity for MenuItemReview {
    type Create = MenuItemReviewParams;

    const META: EntityMeta = EntityMeta {
        name: "MenuItemReview",
        label: "MenuItemReview",
        route: "/api/menuitemreview",
        key_param: "id",
        key: KeyKind::Generated,
        table: "menu_item_reviews",
        key_column: "id",
        columns: &["item_id", "reviewer_email", "stars", "date_reviewed", "comments"],
    };
    const POLICY: AccessPolicy = AccessPolicy::STANDARD;

    fn id(&self) -> EntityId {
        EntityId::Generated(self.id)
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_create(params: MenuItemReviewParams) -> Self {
        Self {
            id: 0,
            item_id: params.item_id,
            reviewer_email: params.reviewer_email,
            stars: params.stars,
            date_reviewed: params.date_reviewed,
            comments: params.comments,
        }
    }

    fn overwrite(&mut self, incoming: Self) {
        self.item_id = incoming.item_id;
        self.reviewer_email = incoming.reviewer_email;
        self.stars = incoming.stars;
        self.date_reviewed = incoming.date_reviewed;
        self.comments = incoming.comments;
    }

    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.item_id)
            .bind(self.reviewer_email.clone())
            .bind(self.stars)
            .bind(self.date_reviewed)
            .bind(self.comments.clone())
    }
}
