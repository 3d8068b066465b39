use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::policy::AccessPolicy;
use crate::database::entity::{Entity, EntityId, EntityMeta, KeyKind, PgQueryAs};

/// A dish served at one station of a dining commons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: i64,
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemParams {
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

impl Entity for MenuItem {
    type Create = MenuItemParams;

    const META: EntityMeta = EntityMeta {
        name: "UCSBDiningCommonsMenuItem",
        label: "UCSBDiningCommonsMenuItem",
        route: "/api/ucsbdiningcommonsmenuitem",
        key_param: "id",
        key: KeyKind::Generated,
        table: "menu_items",
        key_column: "id",
        columns: &["dining_commons_code", "name", "station"],
    };
    const POLICY: AccessPolicy = AccessPolicy::STANDARD;

    fn id(&self) -> EntityId {
        EntityId::Generated(self.id)
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_create(params: MenuItemParams) -> Self {
        Self {
            id: 0,
            dining_commons_code: params.dining_commons_code,
            name: params.name,
            station: params.station,
        }
    }

    fn overwrite(&mut self, incoming: Self) {
        self.dining_commons_code = incoming.dining_commons_code;
        self.name = incoming.name;
        self.station = incoming.station;
    }

    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.dining_commons_code.clone())
            .bind(self.name.clone())
            .bind(self.station.clone())
    }
}
