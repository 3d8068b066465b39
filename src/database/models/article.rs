use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::policy::AccessPolicy;
use crate::database::entity::{Entity, EntityId, EntityMeta, KeyKind, PgQueryAs};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    pub date_added: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleParams {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    pub date_added: NaiveDateTime,
}

impl Entity for Article {
    type Create = ArticleParams;

    const META: EntityMeta = EntityMeta {
        // not-found errors use the plural, confirmations the singular
        name: "Articles",
        label: "Article",
        route: "/api/articles",
        key_param: "id",
        key: KeyKind::Generated,
        table: "articles",
        key_column: "id",
        columns: &["title", "url", "explanation", "email", "date_added"],
    };
    const POLICY: AccessPolicy = AccessPolicy::STANDARD;

    fn id(&self) -> EntityId {
        EntityId::Generated(self.id)
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_create(params: ArticleParams) -> Self {
        Self {
            id: 0,
            title: params.title,
            url: params.url,
            explanation: params.explanation,
            email: params.email,
            date_added: params.date_added,
        }
    }

    fn overwrite(&mut self, incoming: Self) {
        self.title = incoming.title;
        self.url = incoming.url;
        self.explanation = incoming.explanation;
        self.email = incoming.email;
        self.date_added = incoming.date_added;
    }

    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.title.clone())
            .bind(self.url.clone())
            .bind(self.explanation.clone())
            .bind(self.email.clone())
            .bind(self.date_added)
    }
}
