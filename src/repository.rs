//! The entity repository: single source of truth for every business
//! collection during a session.
//!
//! The repository is constructed once at process start via
//! [`Repository::load`], which hydrates each collection from the durable
//! store with its documented default, and is then passed by reference to
//! whatever needs it. Every state change goes through one of the
//! `mutate_*` methods, which apply an in-memory transformation and
//! immediately flush the affected key back to the store — in-memory and
//! durable state diverge for no longer than one mutation (and
//! indefinitely only if the best-effort write fails, which is logged and
//! swallowed).
//!
//! There are no cross-collection transactions: a flow that touches two
//! collections issues two independent mutate calls, and a storage
//! failure between them can leave the durable copies desynchronized.
//! Acceptable for a single-device tool; callers must not paper over it
//! with their own transactional layer.

use crate::core::settings::Settings;
use crate::models::{
    CartLine, Customer, Debt, Delivery, ExternalDebt, Notification, Product, Sale,
    SavedCredentials, User,
};
use crate::store::Store;
use tracing::{debug, info, instrument, warn};

const KEY_CART: &str = "cart_saved";
const KEY_INVOICE_COUNTER: &str = "invoice_counter";
const KEY_SETTINGS: &str = "settings";
const KEY_USERS: &str = "users";
const KEY_PRODUCTS: &str = "products";
const KEY_CUSTOMERS: &str = "customers";
const KEY_SALES: &str = "sales";
const KEY_DEBTS: &str = "debts";
const KEY_EXTERNAL_DEBTS: &str = "external_debts";
const KEY_DELIVERIES: &str = "deliveries";
const KEY_NOTIFICATIONS: &str = "notifications";
const KEY_TODAY_SALES: &str = "today_sales";
const KEY_SAVED_USER: &str = "saved_user";

/// The seeded account list: a single admin, always resolvable even on a
/// blank store.
pub(crate) fn seed_users() -> Vec<User> {
    vec![User {
        id: 1,
        username: "admin".to_string(),
        password: "admin".to_string(),
        role: "admin".to_string(),
        name: "المدير".to_string(),
    }]
}

/// In-memory owner of all business collections, synchronized to the
/// durable store after every mutation.
pub struct Repository {
    store: Store,
    cart: Vec<CartLine>,
    invoice_counter: u64,
    settings: Settings,
    users: Vec<User>,
    products: Vec<Product>,
    customers: Vec<Customer>,
    sales: Vec<Sale>,
    debts: Vec<Debt>,
    external_debts: Vec<ExternalDebt>,
    deliveries: Vec<Delivery>,
    notifications: Vec<Notification>,
    today_sales: Vec<Sale>,
    saved_user: Option<SavedCredentials>,
    /// Session-only; never persisted.
    current_user: Option<User>,
}

impl Repository {
    /// Hydrates every collection from the store, falling back to the
    /// documented default when a key is absent or corrupt. Called
    /// exactly once at process start.
    #[instrument(skip(store))]
    pub async fn load(store: Store) -> Self {
        debug!("Hydrating repository from durable store.");
        let repo = Self {
            cart: store.get_or(KEY_CART, Vec::new()).await,
            invoice_counter: store.get_or(KEY_INVOICE_COUNTER, 1).await,
            settings: store.get_or(KEY_SETTINGS, Settings::default()).await,
            users: store.get_or(KEY_USERS, seed_users()).await,
            products: store.get_or(KEY_PRODUCTS, Vec::new()).await,
            customers: store.get_or(KEY_CUSTOMERS, Vec::new()).await,
            sales: store.get_or(KEY_SALES, Vec::new()).await,
            debts: store.get_or(KEY_DEBTS, Vec::new()).await,
            external_debts: store.get_or(KEY_EXTERNAL_DEBTS, Vec::new()).await,
            deliveries: store.get_or(KEY_DELIVERIES, Vec::new()).await,
            notifications: store.get_or(KEY_NOTIFICATIONS, Vec::new()).await,
            today_sales: store.get_or(KEY_TODAY_SALES, Vec::new()).await,
            saved_user: store.get_or(KEY_SAVED_USER, None).await,
            current_user: None,
            store,
        };
        info!(
            "Repository hydrated: {} products, {} customers, {} sales, {} users, {} notifications.",
            repo.products.len(),
            repo.customers.len(),
            repo.sales.len(),
            repo.users.len(),
            repo.notifications.len()
        );
        repo
    }

    // Readers. External collaborators may read freely but must route
    // every change through a `mutate_*` method.

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }
    pub fn invoice_counter(&self) -> u64 {
        self.invoice_counter
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn users(&self) -> &[User] {
        &self.users
    }
    pub fn products(&self) -> &[Product] {
        &self.products
    }
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }
    pub fn external_debts(&self) -> &[ExternalDebt] {
        &self.external_debts
    }
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
    pub fn today_sales(&self) -> &[Sale] {
        &self.today_sales
    }
    pub fn saved_user(&self) -> Option<&SavedCredentials> {
        self.saved_user.as_ref()
    }
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    // Mutations. Each applies the transformation in memory, then
    // immediately flushes the affected key.

    /// Mutates the product list. Any quantity left negative by the
    /// closure is clamped to zero at this boundary — negative stock is a
    /// programming error in the caller, logged loudly.
    pub async fn mutate_products<F: FnOnce(&mut Vec<Product>)>(&mut self, f: F) {
        f(&mut self.products);
        for product in &mut self.products {
            if product.qty < 0 {
                warn!(
                    "Negative quantity {} for product '{}' clamped to 0",
                    product.qty, product.name
                );
                product.qty = 0;
            }
        }
        self.store.set(KEY_PRODUCTS, &self.products).await;
    }

    pub async fn mutate_customers<F: FnOnce(&mut Vec<Customer>)>(&mut self, f: F) {
        f(&mut self.customers);
        self.store.set(KEY_CUSTOMERS, &self.customers).await;
    }

    pub async fn mutate_sales<F: FnOnce(&mut Vec<Sale>)>(&mut self, f: F) {
        f(&mut self.sales);
        self.store.set(KEY_SALES, &self.sales).await;
    }

    pub async fn mutate_today_sales<F: FnOnce(&mut Vec<Sale>)>(&mut self, f: F) {
        f(&mut self.today_sales);
        self.store.set(KEY_TODAY_SALES, &self.today_sales).await;
    }

    pub async fn mutate_debts<F: FnOnce(&mut Vec<Debt>)>(&mut self, f: F) {
        f(&mut self.debts);
        self.store.set(KEY_DEBTS, &self.debts).await;
    }

    pub async fn mutate_external_debts<F: FnOnce(&mut Vec<ExternalDebt>)>(&mut self, f: F) {
        f(&mut self.external_debts);
        self.store.set(KEY_EXTERNAL_DEBTS, &self.external_debts).await;
    }

    pub async fn mutate_deliveries<F: FnOnce(&mut Vec<Delivery>)>(&mut self, f: F) {
        f(&mut self.deliveries);
        self.store.set(KEY_DELIVERIES, &self.deliveries).await;
    }

    pub async fn mutate_users<F: FnOnce(&mut Vec<User>)>(&mut self, f: F) {
        f(&mut self.users);
        self.store.set(KEY_USERS, &self.users).await;
    }

    pub async fn mutate_notifications<F: FnOnce(&mut Vec<Notification>)>(&mut self, f: F) {
        f(&mut self.notifications);
        self.store.set(KEY_NOTIFICATIONS, &self.notifications).await;
    }

    pub async fn mutate_cart<F: FnOnce(&mut Vec<CartLine>)>(&mut self, f: F) {
        f(&mut self.cart);
        self.store.set(KEY_CART, &self.cart).await;
    }

    pub async fn mutate_settings<F: FnOnce(&mut Settings)>(&mut self, f: F) {
        f(&mut self.settings);
        self.store.set(KEY_SETTINGS, &self.settings).await;
    }

    pub async fn mutate_invoice_counter<F: FnOnce(&mut u64)>(&mut self, f: F) {
        f(&mut self.invoice_counter);
        self.store.set(KEY_INVOICE_COUNTER, &self.invoice_counter).await;
    }

    /// Explicitly persists the cart as-is. The UI calls this on
    /// navigation so an open cart survives leaving and returning to the
    /// sale screen.
    pub async fn save_cart(&mut self) {
        self.store.set(KEY_CART, &self.cart).await;
    }

    /// Persists the credential pair used for auto-login on next start.
    pub async fn set_saved_user(&mut self, credentials: SavedCredentials) {
        self.saved_user = Some(credentials);
        self.store.set(KEY_SAVED_USER, &self.saved_user).await;
    }

    pub async fn clear_saved_user(&mut self) {
        self.saved_user = None;
        self.store.set(KEY_SAVED_USER, &self.saved_user).await;
    }

    /// Session-only; not persisted.
    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    pub fn clear_current_user(&mut self) {
        self.current_user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::store::test_utils::{init_test_tracing, raw_insert, setup_test_store};

    fn test_product(id: i64, name: &str, qty: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            qty,
            price: 100.0,
        }
    }

    #[tokio::test]
    async fn test_load_defaults_on_empty_store() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;
        let repo = Repository::load(store).await;

        assert!(repo.products().is_empty());
        assert!(repo.customers().is_empty());
        assert!(repo.sales().is_empty());
        assert!(repo.cart().is_empty());
        assert!(repo.notifications().is_empty());
        assert_eq!(repo.invoice_counter(), 1);
        assert!(repo.saved_user().is_none());
        assert!(repo.current_user().is_none());

        // The seeded admin account is always resolvable.
        assert_eq!(repo.users().len(), 1);
        assert_eq!(repo.users()[0].username, "admin");
        assert_eq!(repo.users()[0].role, "admin");

        Ok(())
    }

    #[tokio::test]
    async fn test_mutation_flushes_to_store() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;
        let mut repo = Repository::load(store.clone()).await;

        repo.mutate_products(|products| {
            products.push(test_product(1, "سكر", 20));
        })
        .await;

        // A second hydration of the same store sees the write.
        let reloaded = Repository::load(store).await;
        assert_eq!(reloaded.products().len(), 1);
        assert_eq!(reloaded.products()[0].name, "سكر");
        assert_eq!(reloaded.products()[0].qty, 20);

        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_collection_falls_back_to_default() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;
        raw_insert(&store, "products", "][ definitely not json")?;

        let repo = Repository::load(store).await;
        assert!(repo.products().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_qty_clamped_at_mutation_boundary() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;
        let mut repo = Repository::load(store.clone()).await;

        repo.mutate_products(|products| {
            products.push(test_product(1, "زيت", 2));
        })
        .await;
        repo.mutate_products(|products| {
            products[0].qty -= 5;
        })
        .await;

        assert_eq!(repo.products()[0].qty, 0, "Quantity never goes negative");

        // The clamped value is what was persisted.
        let reloaded = Repository::load(store).await;
        assert_eq!(reloaded.products()[0].qty, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_survives_reload() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;
        let mut repo = Repository::load(store.clone()).await;

        repo.mutate_cart(|cart| {
            cart.push(CartLine {
                product_id: 3,
                name: "حليب".to_string(),
                price: 120.0,
                qty: 2,
            });
        })
        .await;
        repo.save_cart().await;

        let reloaded = Repository::load(store).await;
        assert_eq!(reloaded.cart().len(), 1);
        assert_eq!(reloaded.cart()[0].name, "حليب");

        Ok(())
    }

    #[tokio::test]
    async fn test_saved_user_roundtrip_and_clear() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;
        let mut repo = Repository::load(store.clone()).await;

        repo.set_saved_user(SavedCredentials {
            username: "admin".to_string(),
            password: "admin".to_string(),
        })
        .await;

        let reloaded = Repository::load(store.clone()).await;
        assert_eq!(reloaded.saved_user().map(|c| c.username.as_str()), Some("admin"));

        repo.clear_saved_user().await;
        let reloaded = Repository::load(store).await;
        assert!(reloaded.saved_user().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_users_hydrate_from_store_not_seed_when_present() -> Result<()> {
        init_test_tracing();
        let store = setup_test_store()?;
        let mut repo = Repository::load(store.clone()).await;

        repo.mutate_users(|users| {
            users.push(User {
                id: 2,
                username: "kacem".to_string(),
                password: "1234".to_string(),
                role: "cashier".to_string(),
                name: "قاسم".to_string(),
            });
        })
        .await;

        let reloaded = Repository::load(store).await;
        assert_eq!(reloaded.users().len(), 2);

        Ok(())
    }
}
