use bytes::Bytes;
use rust_decimal::Decimal;

use medicart_domain::pagination::PageRequest;
use medicart_shop::domain::types::{
    CategoryPatch, MAX_AMOUNT, NewCategory, NewProduct, ProductPatch,
};
use medicart_shop::error::ShopServiceError;
use medicart_shop::usecase::catalog::{
    CreateCategoryUseCase, CreateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase,
    GetCategoryUseCase, GetProductUseCase, ListProductsByCategoryUseCase, ListProductsUseCase,
    SearchProductsUseCase, UpdateCategoryUseCase, UpdateProductUseCase, UploadImageUseCase,
};

use crate::helpers::{MemCategories, MemFiles, MemProducts, test_category, test_product};

fn new_product(name: &str, price: Decimal, category_id: Option<i32>) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: None,
        price,
        image: None,
        category_id,
    }
}

// ── Categories ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_update_and_delete_category() {
    let categories = MemCategories::default();

    let created = CreateCategoryUseCase {
        categories: categories.clone(),
    }
    .execute(NewCategory {
        name: "Pain relief".to_owned(),
        description: None,
        image: None,
    })
    .await
    .unwrap();

    let updated = UpdateCategoryUseCase {
        categories: categories.clone(),
    }
    .execute(
        created.id,
        CategoryPatch {
            description: Some("Analgesics".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Pain relief");
    assert_eq!(updated.description.as_deref(), Some("Analgesics"));

    DeleteCategoryUseCase {
        categories: categories.clone(),
    }
    .execute(created.id)
    .await
    .unwrap();

    let gone = GetCategoryUseCase { categories }.execute(created.id).await;
    assert!(matches!(gone, Err(ShopServiceError::CategoryNotFound)));
}

#[tokio::test]
async fn should_reject_empty_category_patch_and_unknown_category() {
    let usecase = UpdateCategoryUseCase {
        categories: MemCategories::with(vec![test_category(1, "Vitamins")]),
    };

    assert!(matches!(
        usecase.execute(1, CategoryPatch::default()).await,
        Err(ShopServiceError::MissingData)
    ));
    assert!(matches!(
        usecase
            .execute(
                7,
                CategoryPatch {
                    name: Some("Other".to_owned()),
                    ..Default::default()
                }
            )
            .await,
        Err(ShopServiceError::CategoryNotFound)
    ));
}

// ── Products ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_existing_category_for_product() {
    let categories = MemCategories::with(vec![test_category(1, "Vitamins")]);
    let products = MemProducts::default();
    let usecase = CreateProductUseCase {
        categories: categories.clone(),
        products: products.clone(),
    };

    let created = usecase
        .execute(new_product("Vitamin C", Decimal::new(450, 2), Some(1)))
        .await
        .unwrap();
    assert_eq!(created.category_id, Some(1));

    let orphan = usecase
        .execute(new_product("Zinc", Decimal::new(300, 2), Some(42)))
        .await;
    assert!(matches!(orphan, Err(ShopServiceError::CategoryNotFound)));

    let moved = UpdateProductUseCase {
        categories,
        products: products.clone(),
    }
    .execute(
        created.id,
        ProductPatch {
            category_id: Some(42),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(moved, Err(ShopServiceError::CategoryNotFound)));
    assert_eq!(products.get(created.id).unwrap().category_id, Some(1));
}

#[tokio::test]
async fn should_reject_negative_price() {
    let result = CreateProductUseCase {
        categories: MemCategories::default(),
        products: MemProducts::default(),
    }
    .execute(new_product("Refund", Decimal::new(-1, 0), None))
    .await;

    assert!(matches!(result, Err(ShopServiceError::MissingData)));
}

#[tokio::test]
async fn should_reject_price_too_large_to_store() {
    let products = MemProducts::with(vec![test_product(1, "Napa", Decimal::ONE)]);
    let too_large = MAX_AMOUNT + Decimal::new(1, 2);

    let created = CreateProductUseCase {
        categories: MemCategories::default(),
        products: products.clone(),
    }
    .execute(new_product("Gold leaf", too_large, None))
    .await;
    assert!(matches!(created, Err(ShopServiceError::AmountOutOfRange)));

    let update = UpdateProductUseCase {
        categories: MemCategories::default(),
        products: products.clone(),
    };
    let updated = update
        .execute(
            1,
            ProductPatch {
                price: Some(too_large),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(updated, Err(ShopServiceError::AmountOutOfRange)));
    assert_eq!(products.get(1).unwrap().price, Decimal::ONE);

    let at_limit = update
        .execute(
            1,
            ProductPatch {
                price: Some(MAX_AMOUNT),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(at_limit.price, MAX_AMOUNT);
}

#[tokio::test]
async fn should_page_through_products() {
    let products = MemProducts::with(
        (1..=25)
            .map(|id| test_product(id, &format!("Item {id}"), Decimal::ONE))
            .collect(),
    );
    let usecase = ListProductsUseCase { products };

    let first = usecase.execute(PageRequest::default()).await.unwrap();
    let last = usecase
        .execute(PageRequest {
            per_page: 20,
            page: 2,
        })
        .await
        .unwrap();

    assert_eq!(first.len(), 20);
    assert_eq!(last.len(), 5);
    assert_eq!(last[0].id, 21);
}

#[tokio::test]
async fn should_search_by_name_case_insensitively() {
    let products = MemProducts::with(vec![
        test_product(1, "Napa Extra", Decimal::ONE),
        test_product(2, "Seclo 20mg", Decimal::ONE),
    ]);
    let usecase = SearchProductsUseCase { products };

    let hits = usecase.execute("NAPA").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);
    assert!(matches!(
        usecase.execute("  ").await,
        Err(ShopServiceError::MissingData)
    ));
}

#[tokio::test]
async fn should_treat_like_wildcards_as_literal_text() {
    let usecase = SearchProductsUseCase {
        products: MemProducts::with(vec![
            test_product(1, "Napa Extra", Decimal::ONE),
            test_product(2, "Zinc 100%", Decimal::ONE),
        ]),
    };

    let hits = usecase.execute("%").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
    assert!(usecase.execute("_").await.unwrap().is_empty());
}

#[tokio::test]
async fn should_list_products_in_category() {
    let mut vitamin = test_product(1, "Vitamin C", Decimal::ONE);
    vitamin.category_id = Some(1);
    let products = MemProducts::with(vec![vitamin, test_product(2, "Napa", Decimal::ONE)]);
    let usecase = ListProductsByCategoryUseCase {
        categories: MemCategories::with(vec![test_category(1, "Vitamins")]),
        products,
    };

    let listed = usecase.execute(1).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Vitamin C");
    assert!(matches!(
        usecase.execute(9).await,
        Err(ShopServiceError::CategoryNotFound)
    ));
}

#[tokio::test]
async fn should_report_missing_product() {
    let products = MemProducts::default();

    assert!(matches!(
        GetProductUseCase {
            products: products.clone()
        }
        .execute(3)
        .await,
        Err(ShopServiceError::ProductNotFound)
    ));
    assert!(matches!(
        DeleteProductUseCase { products }.execute(3).await,
        Err(ShopServiceError::ProductNotFound)
    ));
}

// ── Image upload ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_only_image_uploads() {
    let files = MemFiles::default();
    let usecase = UploadImageUseCase {
        files: files.clone(),
    };

    let url = usecase
        .execute("box.webp", Bytes::from_static(b"RIFF"))
        .await
        .unwrap();
    assert_eq!(url, "/uploads/file-1.webp");

    assert!(matches!(
        usecase.execute("script.sh", Bytes::from_static(b"#!")).await,
        Err(ShopServiceError::InvalidUpload)
    ));
    assert!(matches!(
        usecase.execute("empty.png", Bytes::new()).await,
        Err(ShopServiceError::InvalidUpload)
    ));
    assert_eq!(files.stored.lock().unwrap().len(), 1);
}
