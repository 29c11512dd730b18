//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use firstshot_core::{
    BaseUser, CarItem, Image, Item, ItemPatch, Offer, PlaneItem, Schedule, ScheduleRequest,
    StoredItem, TravelItem, UserIn,
};

use crate::app::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "First Shot",
        description = "A walk through request parameters, bodies, forms, files, dependencies, errors and middleware.",
        contact(name = "First Shot maintainers", url = "https://example.com/contact"),
        license(name = "MIT")
    ),
    paths(
        routes::system::read_main,
        routes::system::get_portal,
        routes::items::read_items,
        routes::items::read_item,
        routes::items::update_item,
        routes::items::schedule_item,
        routes::travel::read_travel_item,
        routes::users::create_user,
        routes::offers::read_offer,
        routes::offers::create_offer,
        routes::images::create_multiple_images,
        routes::images::create_index_weights,
        routes::forms::login,
        routes::forms::create_file,
        routes::forms::create_upload_file,
        routes::forms::create_upload_files,
        routes::unicorns::read_unicorn,
        routes::notifications::send_notification,
        routes::stored_items::list_stored_items,
        routes::stored_items::read_stored_item,
        routes::stored_items::replace_stored_item,
        routes::stored_items::patch_stored_item,
    ),
    components(schemas(
        Image,
        Item,
        CarItem,
        PlaneItem,
        TravelItem,
        Offer,
        BaseUser,
        UserIn,
        StoredItem,
        ItemPatch,
        ScheduleRequest,
        Schedule,
        routes::items::EmbeddedItem,
        routes::items::ItemUpdate,
        routes::stored_items::StoredItemEntry,
    )),
    tags(
        (name = "system", description = "Greeting and redirects"),
        (name = "items", description = "Path, query, header, cookie and body parameters"),
        (name = "users", description = "Response models that hide input fields"),
        (name = "offers", description = "Nested models and HTTP errors with headers"),
        (name = "images", description = "Lists and maps as bodies"),
        (name = "forms", description = "Form fields and file uploads"),
        (name = "errors", description = "Custom error responses"),
        (name = "notifications", description = "Background tasks"),
        (name = "stored-items", description = "Full and partial updates"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub const TITLE: &'static str = "First Shot";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_annotated_route() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, ApiDoc::TITLE);
        for path in ["/", "/items/{item_id}", "/uploadfiles/", "/stored-items/{item_id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
