use crate::client::{ApiClient, Auth};
use crate::error::Result;
use crate::models::{NewWishlistItem, WishlistItem};

/// Saved products under `/wishlist`.
pub struct WishlistApi<'a> {
    client: &'a ApiClient,
}

impl<'a> WishlistApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<WishlistItem>> {
        self.client.get("/wishlist", Auth::Required)
    }

    pub fn add(&self, item: &NewWishlistItem) -> Result<WishlistItem> {
        self.client.post("/wishlist", item, Auth::Required)
    }

    pub fn remove(&self, item_id: &str) -> Result<()> {
        self.client
            .delete(&format!("/wishlist/{}", item_id), Auth::Required)
    }
}
