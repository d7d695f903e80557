//! Bundled example scenarios.
//!
//! Three representative e-commerce upgrades across categories, channels and
//! lifecycle stages, used to seed an empty workspace.

use kaizen_core::{LifecycleStage, ScenarioInputs};

/// Build the bundled example scenarios.
pub fn example_scenarios() -> Vec<ScenarioInputs> {
    vec![
        ScenarioInputs::builder("Premium Material Upgrade", "Premium Apparel XS-450")
            .product_category("Apparel")
            .sales_channel("Direct to Consumer")
            .lifecycle_stage(LifecycleStage::Growth)
            .current_unit_sales(750.0)
            .current_returns(94.0)
            .avg_sale_price(89.99)
            .current_unit_cost(32.50)
            .annual_unit_sales(9125.0)
            .annual_returns(1140.0)
            .upgrade_solution("Premium fabric with improved durability")
            .development_cost(5000.0)
            .unit_cost_change(1.25)
            .return_reduction_pct(30.0)
            .sales_increase_pct(5.0)
            .return_processing_cost(4.90)
            .time_to_implement(1.0)
            .build_unchecked(),
        ScenarioInputs::builder("Size Verification Enhancement", "Athletic Shoes 360")
            .product_category("Footwear")
            .sales_channel("Shopify")
            .lifecycle_stage(LifecycleStage::Maturity)
            .current_unit_sales(420.0)
            .current_returns(71.0)
            .avg_sale_price(129.99)
            .current_unit_cost(45.75)
            .annual_unit_sales(5100.0)
            .annual_returns(860.0)
            .upgrade_solution("Interactive size verification tool")
            .development_cost(7500.0)
            .unit_cost_change(0.0)
            .return_reduction_pct(35.0)
            .sales_increase_pct(8.0)
            .return_processing_cost(8.25)
            .time_to_implement(2.0)
            .build_unchecked(),
        ScenarioInputs::builder("Product Image Enhancement", "HomeStyle Décor Collection")
            .product_category("Home Goods")
            .sales_channel("Amazon")
            .lifecycle_stage(LifecycleStage::Introduction)
            .current_unit_sales(1250.0)
            .current_returns(138.0)
            .avg_sale_price(49.99)
            .current_unit_cost(18.50)
            .annual_unit_sales(15200.0)
            .annual_returns(1675.0)
            .upgrade_solution("360° product views and improved images")
            .development_cost(3200.0)
            .unit_cost_change(0.0)
            .return_reduction_pct(25.0)
            .sales_increase_pct(12.0)
            .return_processing_cost(3.50)
            .time_to_implement(1.0)
            .build_unchecked(),
    ]
}
