use bytes::Bytes;

use medicart_domain::pagination::PageRequest;

use crate::domain::repository::{CategoryRepository, FileStore, ProductRepository};
use crate::domain::types::{
    Category, CategoryPatch, NewCategory, NewProduct, Product, ProductPatch, is_storable_amount,
};
use crate::error::ShopServiceError;
use crate::infra::storage::image_extension;

// ── Categories ───────────────────────────────────────────────────────────────

pub struct ListCategoriesUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> ListCategoriesUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<Category>, ShopServiceError> {
        self.categories.list().await
    }
}

pub struct GetCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> GetCategoryUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<Category, ShopServiceError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(ShopServiceError::CategoryNotFound)
    }
}

pub struct CreateCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> CreateCategoryUseCase<C> {
    pub async fn execute(&self, category: NewCategory) -> Result<Category, ShopServiceError> {
        if category.name.trim().is_empty() {
            return Err(ShopServiceError::MissingData);
        }
        self.categories.create(&category).await
    }
}

pub struct UpdateCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> UpdateCategoryUseCase<C> {
    pub async fn execute(
        &self,
        id: i32,
        patch: CategoryPatch,
    ) -> Result<Category, ShopServiceError> {
        if patch.is_empty() {
            return Err(ShopServiceError::MissingData);
        }
        self.categories
            .update(id, &patch)
            .await?
            .ok_or(ShopServiceError::CategoryNotFound)
    }
}

pub struct DeleteCategoryUseCase<C: CategoryRepository> {
    pub categories: C,
}

impl<C: CategoryRepository> DeleteCategoryUseCase<C> {
    /// Products in the category are kept, uncategorized.
    pub async fn execute(&self, id: i32) -> Result<(), ShopServiceError> {
        if self.categories.delete(id).await? {
            Ok(())
        } else {
            Err(ShopServiceError::CategoryNotFound)
        }
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> ListProductsUseCase<P> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Product>, ShopServiceError> {
        self.products.list(page.clamped()).await
    }
}

pub struct GetProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> GetProductUseCase<P> {
    pub async fn execute(&self, id: i32) -> Result<Product, ShopServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(ShopServiceError::ProductNotFound)
    }
}

pub struct SearchProductsUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> SearchProductsUseCase<P> {
    pub async fn execute(&self, name: &str) -> Result<Vec<Product>, ShopServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShopServiceError::MissingData);
        }
        self.products.search_by_name(name).await
    }
}

pub struct ListProductsByCategoryUseCase<C: CategoryRepository, P: ProductRepository> {
    pub categories: C,
    pub products: P,
}

impl<C: CategoryRepository, P: ProductRepository> ListProductsByCategoryUseCase<C, P> {
    pub async fn execute(&self, category_id: i32) -> Result<Vec<Product>, ShopServiceError> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(ShopServiceError::CategoryNotFound);
        }
        self.products.list_by_category(category_id).await
    }
}

pub struct CreateProductUseCase<C: CategoryRepository, P: ProductRepository> {
    pub categories: C,
    pub products: P,
}

impl<C: CategoryRepository, P: ProductRepository> CreateProductUseCase<C, P> {
    pub async fn execute(&self, product: NewProduct) -> Result<Product, ShopServiceError> {
        if product.name.trim().is_empty() || product.price.is_sign_negative() {
            return Err(ShopServiceError::MissingData);
        }
        if !is_storable_amount(product.price) {
            return Err(ShopServiceError::AmountOutOfRange);
        }
        if let Some(category_id) = product.category_id {
            if self.categories.find_by_id(category_id).await?.is_none() {
                return Err(ShopServiceError::CategoryNotFound);
            }
        }
        self.products.create(&product).await
    }
}

pub struct UpdateProductUseCase<C: CategoryRepository, P: ProductRepository> {
    pub categories: C,
    pub products: P,
}

impl<C: CategoryRepository, P: ProductRepository> UpdateProductUseCase<C, P> {
    pub async fn execute(&self, id: i32, patch: ProductPatch) -> Result<Product, ShopServiceError> {
        if patch.is_empty() || patch.price.is_some_and(|p| p.is_sign_negative()) {
            return Err(ShopServiceError::MissingData);
        }
        if patch.price.is_some_and(|p| !is_storable_amount(p)) {
            return Err(ShopServiceError::AmountOutOfRange);
        }
        if let Some(category_id) = patch.category_id {
            if self.categories.find_by_id(category_id).await?.is_none() {
                return Err(ShopServiceError::CategoryNotFound);
            }
        }
        self.products
            .update(id, &patch)
            .await?
            .ok_or(ShopServiceError::ProductNotFound)
    }
}

pub struct DeleteProductUseCase<P: ProductRepository> {
    pub products: P,
}

impl<P: ProductRepository> DeleteProductUseCase<P> {
    /// Placed orders keep their own copy of the product name and price.
    pub async fn execute(&self, id: i32) -> Result<(), ShopServiceError> {
        if self.products.delete(id).await? {
            Ok(())
        } else {
            Err(ShopServiceError::ProductNotFound)
        }
    }
}

// ── Image upload ─────────────────────────────────────────────────────────────

pub struct UploadImageUseCase<F: FileStore> {
    pub files: F,
}

impl<F: FileStore> UploadImageUseCase<F> {
    /// Store an image upload and return its public URL.
    pub async fn execute(&self, file_name: &str, bytes: Bytes) -> Result<String, ShopServiceError> {
        let extension = image_extension(file_name).ok_or(ShopServiceError::InvalidUpload)?;
        if bytes.is_empty() {
            return Err(ShopServiceError::InvalidUpload);
        }
        self.files
            .store(&extension, bytes)
            .await
            .map_err(|e| ShopServiceError::Internal(e.into()))
    }
}
