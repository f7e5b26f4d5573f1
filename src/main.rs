use std::sync::Arc;

use tracing::{error, info, Instrument};

use storefront_cart::{
    load_settings, setup_tracing, CartSystem, Product, TracingNotifier, UpdateProductAmount,
};

fn demo_catalog() -> Vec<(Product, i64)> {
    vec![
        (Product::new(1, "Tênis de Caminhada Leve Confortável", 179.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"), 3),
        (Product::new(2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg"), 5),
        (Product::new(3, "Tênis Adidas Duramo Lite 2.0", 219.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis3.jpg"), 2),
    ]
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = load_settings().map_err(|e| format!("{e:#}"))?;
    info!(storage = %settings.storage_path.display(), key = %settings.storage_key, "Starting storefront cart");

    let system = CartSystem::from_settings(&settings, demo_catalog(), Arc::new(TracingNotifier))
        .map_err(|e| format!("{e:#}"))?;
    let cart = system.cart_client.clone();

    let span = tracing::info_span!("shopping");
    async {
        for product_id in [1, 2, 1, 1] {
            match cart.add_product(product_id).await {
                Ok(cart) => info!(product_id, items = cart.len(), total = cart.total(), "Added to cart"),
                Err(e) => error!(product_id, error = %e, "Add failed"),
            }
        }

        match cart.update_product_amount(UpdateProductAmount::new(2, 4)).await {
            Ok(cart) => info!(quantity = cart.total_quantity(), "Quantity changed"),
            Err(e) => error!(error = %e, "Quantity change failed"),
        }

        if let Err(e) = cart.remove_product(3).await {
            error!(error = %e, "Remove failed");
        }
    }
    .instrument(span)
    .await;

    let final_cart = cart.get_cart().await.map_err(|e| e.to_string())?;
    for item in final_cart.iter() {
        info!(id = item.id, title = %item.title, amount = item.amount, subtotal = item.subtotal(), "Line item");
    }
    info!(total = final_cart.total(), "Cart total");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
