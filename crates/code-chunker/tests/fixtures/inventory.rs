use std::collections::HashMap;
use std::fmt;

/// Stock keeping unit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sku(String);

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct Inventory {
    items: HashMap<Sku, u32>,
    reserved: HashMap<Sku, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` units of `sku` to stock.
    pub fn restock(&mut self, sku: Sku, count: u32) {
        *self.items.entry(sku).or_insert(0) += count;
    }

    /// Units that are in stock and not reserved.
    pub fn available(&self, sku: &Sku) -> u32 {
        let total = self.items.get(sku).copied().unwrap_or(0);
        let held = self.reserved.get(sku).copied().unwrap_or(0);
        total.saturating_sub(held)
    }

    pub fn reserve(&mut self, sku: &Sku, count: u32) -> Result<(), String> {
        if self.available(sku) < count {
            return Err(format!("not enough {sku} in stock"));
        }
        *self.reserved.entry(sku.clone()).or_insert(0) += count;
        Ok(())
    }

    pub fn release(&mut self, sku: &Sku, count: u32) {
        if let Some(held) = self.reserved.get_mut(sku) {
            *held = held.saturating_sub(count);
        }
    }
}

fn main() {
    let mut inventory = Inventory::new();
    let widget = Sku("widget".to_string());
    inventory.restock(widget.clone(), 10);
    inventory.reserve(&widget, 4).expect("reserve");
    println!("available: {}", inventory.available(&widget));
}
