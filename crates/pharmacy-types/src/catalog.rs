//! Featured OTC essentials shown on the shop preview.

use crate::product::Product;

pub fn featured_products() -> Vec<Product> {
    vec![
        Product::new(
            "otc-paracetamol-500",
            "Paracetamol 500mg (10 tablets)",
            30,
            "Pain Relief",
            "https://picsum.photos/seed/paracetamol/200/200",
        ),
        Product::new(
            "otc-ors-sachet",
            "ORS Electrolyte Sachet",
            25,
            "Hydration",
            "https://picsum.photos/seed/ors/200/200",
        ),
        Product::new(
            "otc-cetirizine-10",
            "Cetirizine 10mg (10 tablets)",
            45,
            "Allergy",
            "https://picsum.photos/seed/cetirizine/200/200",
        ),
        Product::new(
            "wellness-vitamin-c",
            "Vitamin C 500mg Chewable",
            220,
            "Vitamins & Supplements",
            "https://picsum.photos/seed/vitaminc/200/200",
        ),
        Product::new(
            "device-thermometer",
            "Digital Thermometer",
            350,
            "Medical Devices",
            "https://picsum.photos/seed/thermometer/200/200",
        ),
    ]
}
