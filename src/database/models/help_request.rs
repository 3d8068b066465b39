use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::policy::AccessPolicy;
use crate::auth::Role;
use crate::database::entity::{Entity, EntityId, EntityMeta, KeyKind, PgQueryAs};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    #[serde(default)]
    pub id: i64,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub explanation: String,
    pub solved: bool,
    pub request_time: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestParams {
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    pub explanation: String,
    pub solved: bool,
    pub request_time: NaiveDateTime,
}

impl Entity for HelpRequest {
    type Create = HelpRequestParams;

    const META: EntityMeta = EntityMeta {
        name: "HelpRequest",
        label: "HelpRequest",
        route: "/api/helprequest",
        key_param: "id",
        key: KeyKind::Generated,
        table: "help_requests",
        key_column: "id",
        columns: &[
            "requester_email",
            "team_id",
            "table_or_breakout_room",
            "explanation",
            "solved",
            "request_time",
        ],
    };
    const POLICY: AccessPolicy = AccessPolicy {
        create: Role::User,
        ..AccessPolicy::STANDARD
    };

    fn id(&self) -> EntityId {
        EntityId::Generated(self.id)
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_create(params: HelpRequestParams) -> Self {
        Self {
            id: 0,
            requester_email: params.requester_email,
            team_id: params.team_id,
            table_or_breakout_room: params.table_or_breakout_room,
            explanation: params.explanation,
            solved: params.solved,
            request_time: params.request_time,
        }
    }

    fn overwrite(&mut self, incoming: Self) {
        self.requester_email = incoming.requester_email;
        self.team_id = incoming.team_id;
        self.table_or_breakout_room = incoming.table_or_breakout_room;
        self.explanation = incoming.explanation;
        self.solved = incoming.solved;
        self.request_time = incoming.request_time;
    }

    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.requester_email.clone())
            .bind(self.team_id.clone())
            .bind(self.table_or_breakout_room.clone())
            .bind(self.explanation.clone())
            .bind(self.solved)
            .bind(self.request_time)
    }
}
