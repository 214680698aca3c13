#[allow(unused_imports)]
pub mod prelude {
    pub use super::kv_entry::Entity as KvEntry;
}

pub mod kv_entry {
    use sea_orm::entity::prelude::*;

    #[sea_orm::model]
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "kv_entries")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub entry_key: String,
        pub entry_value: String,
    }

    impl ActiveModelBehavior for ActiveModel {}
}
