use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::policy::AccessPolicy;
use crate::auth::Role;
use crate::database::entity::{Entity, EntityId, EntityMeta, KeyKind, PgQueryAs};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub id: i64,
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    pub date_requested: NaiveDateTime,
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequestParams {
    pub requester_email: String,
    pub professor_email: String,
    pub explanation: String,
    pub date_requested: NaiveDateTime,
    pub date_needed: NaiveDateTime,
    pub done: bool,
}

impl Entity for RecommendationRequest {
    type Create = RecommendationRequestParams;

    const META: EntityMeta = EntityMeta {
        name: "UCSBRecommendationRequest",
        label: "UCSBRecommendationRequest",
        route: "/api/recommendationRequest",
        key_param: "id",
        key: KeyKind::Generated,
        table: "recommendation_requests",
        key_column: "id",
        columns: &[
            "requester_email",
            "professor_email",
            "explanation",
            "date_requested",
            "date_needed",
            "done",
        ],
    };

    // Any user may file a request; only admins may browse them all.
    const POLICY: AccessPolicy = AccessPolicy {
        list: Role::Admin,
        create: Role::User,
        ..AccessPolicy::STANDARD
    };

    fn id(&self) -> EntityId {
        EntityId::Generated(self.id)
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_create(params: RecommendationRequestParams) -> Self {
        Self {
            id: 0,
            requester_email: params.requester_email,
            professor_email: params.professor_email,
            explanation: params.explanation,
            date_requested: params.date_requested,
            date_needed: params.date_needed,
            done: params.done,
        }
    }

    fn overwrite(&mut self, incoming: Self) {
        self.requester_email = incoming.requester_email;
        self.professor_email = incoming.professor_email;
        self.explanation = incoming.explanation;
        self.date_requested = incoming.date_requested;
        self.date_needed = incoming.date_needed;
        self.done = incoming.done;
    }

    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.requester_email.clone())
            .bind(self.professor_email.clone())
            .bind(self.explanation.clone())
            .bind(self.date_requested)
            .bind(self.date_needed)
            .bind(self.done)
    }
}
