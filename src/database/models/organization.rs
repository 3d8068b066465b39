use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::policy::AccessPolicy;
use crate::database::entity::{Entity, EntityId, EntityMeta, KeyKind, PgQueryAs};

/// Student organization, keyed by its short code (e.g. `ZPR`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Update bodies may leave this out, in which case the looked-up code is kept
    #[serde(default)]
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationParams {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

impl Entity for Organization {
    type Create = OrganizationParams;

    const META: EntityMeta = EntityMeta {
        name: "UCSBOrganization",
        label: "UCSBOrganization",
        route: "/api/ucsborganization",
        key_param: "orgCode",
        key: KeyKind::Natural,
        table: "organizations",
        key_column: "org_code",
        columns: &["org_translation_short", "org_translation", "inactive"],
    };
    const POLICY: AccessPolicy = AccessPolicy::STANDARD;

    fn id(&self) -> EntityId {
        EntityId::Natural(self.org_code.clone())
    }

    fn from_create(params: OrganizationParams) -> Self {
        Self {
            org_code: params.org_code,
            org_translation_short: params.org_translation_short,
            org_translation: params.org_translation,
            inactive: params.inactive,
        }
    }

    fn overwrite(&mut self, incoming: Self) {
        if !incoming.org_code.trim().is_empty() {
            self.org_code = incoming.org_code;
        }
        self.org_translation_short = incoming.org_translation_short;
        self.org_translation = incoming.org_translation;
        self.inactive = incoming.inactive;
    }

    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.org_translation_short.clone())
            .bind(self.org_translation.clone())
            .bind(self.inactive)
    }
}
