//! Basket store database schema.

/// SQL to create the baskets table.
pub const CREATE_BASKETS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS baskets (
    id       BIGSERIAL PRIMARY KEY,
    buyer_id VARCHAR(256) NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_baskets_buyer_id
    ON baskets (buyer_id);
";

/// SQL to create the basket items table.
pub const CREATE_BASKET_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS basket_items (
    id              BIGSERIAL PRIMARY KEY,
    basket_id       BIGINT NOT NULL REFERENCES baskets (id) ON DELETE CASCADE,
    catalog_item_id BIGINT NOT NULL,
    unit_price      NUMERIC(18, 2) NOT NULL,
    quantity        BIGINT NOT NULL CHECK (quantity >= 0),
    UNIQUE (basket_id, catalog_item_id)
);

CREATE INDEX IF NOT EXISTS idx_basket_items_basket_id
    ON basket_items (basket_id);
";
