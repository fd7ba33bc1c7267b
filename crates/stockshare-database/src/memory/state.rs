use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use stockshare_entity::product::Product;
use stockshare_entity::share::ShareToken;
use stockshare_entity::user::User;

#[derive(Debug, Default)]
pub(super) struct MemoryState {
    pub users: HashMap<Uuid, User>,
    pub users_by_email: HashMap<String, Uuid>,
    /// owner -> product id -> product
    pub products: HashMap<Uuid, BTreeMap<String, Product>>,
    pub share_tokens: HashMap<String, ShareToken>,
}
