use crate::emitter::{self, Reply};
use crate::error::Error;
use entity_api::{behavior, Action, Store};

pub async fn fetch(store: &Store) -> Result<Reply, Error> {
    let behavior = {
        let data = store.read().await;
        behavior::find_behavior(&data.behaviors, Action::Catalog, None)?.clone()
    };

    emitter::respond(behavior).await
}
