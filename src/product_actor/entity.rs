//! [`ActorEntity`] implementation for [`Product`].
//!
//! The context is the [`MediaStore`] holding uploaded images, so that replacing or
//! deleting a product also cleans up the image it no longer references.

use super::{ProductAction, ProductActionResult, ProductError, StockReservation};
use crate::media::MediaStore;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

fn required(field: &str, value: String) -> Result<String, ProductError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProductError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Blank values on create fall back to the draft placeholders.
fn or_placeholder(value: String, placeholder: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed.to_string()
    }
}

async fn discard_image(media: &MediaStore, image: &str) {
    if let Err(e) = media.remove(image).await {
        warn!(image, error = %e, "Failed to remove product image");
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = MediaStore;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let draft = ProductCreate::default();
        Ok(Self {
            id,
            name: or_placeholder(params.name, draft.name),
            price: params.price,
            count_in_stock: params.count_in_stock,
            category: params.category,
            brand: params.brand,
            description: params.description,
            image: or_placeholder(params.image, draft.image),
            created_at: Utc::now(),
        })
    }

    /// Price may not be set back to zero once the product is edited.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        media: &MediaStore,
    ) -> Result<(), Self::Error> {
        if update.price == Some(0) {
            return Err(ProductError::InvalidPrice);
        }
        if let Some(name) = update.name {
            self.name = required("Name", name)?;
        }
        let replaced_image = match update.image {
            Some(image) => {
                let image = required("Image", image)?;
                (image != self.image).then(|| std::mem::replace(&mut self.image, image))
            }
            None => None,
        };
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(count) = update.count_in_stock {
            self.count_in_stock = count;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(description) = update.description {
            self.description = description;
        }

        if let Some(old) = replaced_image {
            discard_image(media, &old).await;
        }
        Ok(())
    }

    async fn on_delete(&self, media: &MediaStore) -> Result<(), Self::Error> {
        discard_image(media, &self.image).await;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _media: &MediaStore,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.count_in_stock)),
            ProductAction::ReserveStock(0) | ProductAction::ReleaseStock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(qty) => {
                if !self.is_for_sale() {
                    return Err(ProductError::NotForSale(self.name.clone()));
                }
                if qty > self.count_in_stock {
                    return Err(ProductError::InsufficientStock {
                        product: self.id,
                        name: self.name.clone(),
                        requested: qty,
                        available: self.count_in_stock,
                    });
                }
                self.count_in_stock -= qty;
                Ok(ProductActionResult::ReserveStock(StockReservation {
                    product: self.id,
                    name: self.name.clone(),
                    price: self.price,
                    image: self.image.clone(),
                    qty,
                    remaining: self.count_in_stock,
                }))
            }
            ProductAction::ReleaseStock(qty) => {
                self.count_in_stock = self
                    .count_in_stock
                    .checked_add(qty)
                    .ok_or(ProductError::StockOverflow)?;
                Ok(ProductActionResult::ReleaseStock(self.count_in_stock))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PLACEHOLDER_IMAGE;

    fn media() -> MediaStore {
        MediaStore::new(std::env::temp_dir().join("storefront-product-entity-tests"))
    }

    fn product(price: u64, stock: u32) -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate {
                name: "Trail Shoe".into(),
                price,
                count_in_stock: stock,
                ..ProductCreate::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_are_placeholders() {
        let draft = Product::from_create_params(ProductId(9), ProductCreate::default()).unwrap();
        assert_eq!(draft.image, PLACEHOLDER_IMAGE);
        assert_eq!(draft.price, 0);
        assert!(!draft.is_for_sale());
    }

    #[test]
    fn test_blank_name_and_image_fall_back_on_create() {
        let product = Product::from_create_params(
            ProductId(4),
            ProductCreate {
                name: "   ".into(),
                image: String::new(),
                price: 700,
                ..ProductCreate::default()
            },
        )
        .unwrap();
        assert_eq!(product.name, ProductCreate::default().name);
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
        assert_eq!(product.price, 700);
    }

    #[tokio::test]
    async fn test_update_still_rejects_blank_name() {
        let mut product = product(2500, 1);
        let result = product
            .on_update(
                ProductUpdate {
                    name: Some(" ".into()),
                    ..ProductUpdate::default()
                },
                &media(),
            )
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
        assert_eq!(product.name, "Trail Shoe");
    }

    #[tokio::test]
    async fn test_reserve_and_release() {
        let mut product = product(2500, 5);
        let media = media();

        let reserved = product
            .handle_action(ProductAction::ReserveStock(2), &media)
            .await
            .unwrap();
        match reserved {
            ProductActionResult::ReserveStock(r) => {
                assert_eq!(r.price, 2500);
                assert_eq!(r.remaining, 3);
            }
            other => panic!("unexpected result {other:?}"),
        }

        let released = product
            .handle_action(ProductAction::ReleaseStock(2), &media)
            .await
            .unwrap();
        assert_eq!(released, ProductActionResult::ReleaseStock(5));
    }

    #[tokio::test]
    async fn test_reserve_rejections() {
        let media = media();

        let mut product = product(2500, 1);
        assert_eq!(
            product
                .handle_action(ProductAction::ReserveStock(2), &media)
                .await,
            Err(ProductError::InsufficientStock {
                product: ProductId(1),
                name: "Trail Shoe".into(),
                requested: 2,
                available: 1,
            })
        );
        assert_eq!(
            product
                .handle_action(ProductAction::ReserveStock(0), &media)
                .await,
            Err(ProductError::InvalidQuantity(0))
        );

        let mut draft = self::product(0, 10);
        assert!(matches!(
            draft
                .handle_action(ProductAction::ReserveStock(1), &media)
                .await,
            Err(ProductError::NotForSale(_))
        ));
    }

    #[tokio::test]
    async fn test_update_refuses_zero_price() {
        let mut product = product(2500, 1);
        let result = product
            .on_update(
                ProductUpdate {
                    price: Some(0),
                    ..ProductUpdate::default()
                },
                &media(),
            )
            .await;
        assert_eq!(result, Err(ProductError::InvalidPrice));
    }
}
