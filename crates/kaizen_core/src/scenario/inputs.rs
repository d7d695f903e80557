//! Stored inputs of one product-upgrade scenario.
//!
//! Only inputs are stored; every derived metric is recomputed from them.
//! Field names are the persisted record keys and must stay stable. Aliases
//! accept the column names used by older dashboard exports.

use crate::types::{LifecycleStage, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};

/// Return processing cost assumed when none is given, as a fraction of unit cost.
pub const DEFAULT_PROCESSING_COST_RATIO: f64 = 0.15;

fn default_time_to_implement() -> f64 {
    1.0
}

// Dashboard exports write absent values as explicit nulls.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_time<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_time_to_implement))
}

/// Inputs describing a hypothetical product upgrade.
///
/// Percentages are stored in percent units (12.5 means 12.5%).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    /// Unique, human-chosen scenario name (primary key)
    pub scenario_name: String,
    /// Product the upgrade applies to
    pub product_name: String,
    /// Product category used for grouping
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_category: String,
    /// Sales channel (e.g. "Amazon", "Direct to Consumer")
    #[serde(default, deserialize_with = "null_as_default")]
    pub sales_channel: String,
    /// Lifecycle stage of the product
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_lifecycle_stage: LifecycleStage,

    /// Units sold per month today
    pub current_unit_sales: f64,
    /// Units returned per month today
    pub current_returns: f64,
    /// Production cost per unit today
    pub current_unit_cost: f64,
    /// Average sale price per unit
    pub avg_sale_price: f64,
    /// Units sold per year; monthly x 12 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_unit_sales: Option<f64>,
    /// Units returned per year; monthly x 12 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_returns: Option<f64>,

    /// Free-text description of the upgrade
    #[serde(default, deserialize_with = "null_as_default")]
    pub upgrade_solution: String,
    /// One-time development cost
    pub development_cost: f64,
    /// Change in unit production cost (may be negative)
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_cost_change: f64,
    /// Estimated reduction in returns, in percent
    #[serde(alias = "estimated_return_reduction")]
    pub return_reduction_pct: f64,
    /// Estimated increase in sales, in percent
    #[serde(default, alias = "sales_increase", deserialize_with = "null_as_default")]
    pub sales_increase_pct: f64,
    /// Cost to process one return; 15% of unit cost when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_processing_cost: Option<f64>,
    /// Months until the upgrade is live
    #[serde(
        default = "default_time_to_implement",
        deserialize_with = "null_as_default_time"
    )]
    pub time_to_implement: f64,
    /// Optional free-form tag; the category is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self {
            scenario_name: String::new(),
            product_name: String::new(),
            product_category: String::new(),
            sales_channel: String::new(),
            product_lifecycle_stage: LifecycleStage::default(),
            current_unit_sales: 0.0,
            current_returns: 0.0,
            current_unit_cost: 0.0,
            avg_sale_price: 0.0,
            annual_unit_sales: None,
            annual_returns: None,
            upgrade_solution: String::new(),
            development_cost: 0.0,
            unit_cost_change: 0.0,
            return_reduction_pct: 0.0,
            sales_increase_pct: 0.0,
            return_processing_cost: None,
            time_to_implement: default_time_to_implement(),
            tag: None,
        }
    }
}

impl ScenarioInputs {
    /// Start building inputs for a named scenario.
    pub fn builder(
        scenario_name: impl Into<String>,
        product_name: impl Into<String>,
    ) -> ScenarioInputsBuilder {
        ScenarioInputsBuilder::new(scenario_name, product_name)
    }

    /// Annual unit sales, extrapolated from monthly sales when absent or not positive.
    pub fn effective_annual_unit_sales(&self) -> f64 {
        match self.annual_unit_sales {
            Some(v) if v > 0.0 => v,
            _ => self.current_unit_sales * 12.0,
        }
    }

    /// Annual returns, extrapolated from monthly returns when absent or not positive.
    pub fn effective_annual_returns(&self) -> f64 {
        match self.annual_returns {
            Some(v) if v > 0.0 => v,
            _ => self.current_returns * 12.0,
        }
    }

    /// Return processing cost, defaulted from unit cost when absent.
    pub fn effective_return_processing_cost(&self) -> f64 {
        self.return_processing_cost
            .unwrap_or(self.current_unit_cost * DEFAULT_PROCESSING_COST_RATIO)
    }

    /// Tag, falling back to the product category.
    pub fn effective_tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.product_category)
    }

    /// Validate the inputs.
    ///
    /// Percentage fields only need to be finite; what-if exploration may push
    /// them outside [0, 100].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scenario_name.trim().is_empty() {
            return Err(ValidationError::MissingField("scenario_name"));
        }
        if self.product_name.trim().is_empty() {
            return Err(ValidationError::MissingField("product_name"));
        }

        let signed = [
            ("unit_cost_change", self.unit_cost_change),
            ("return_reduction_pct", self.return_reduction_pct),
            ("sales_increase_pct", self.sales_increase_pct),
        ];
        for (field, value) in signed {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite(field));
            }
        }

        let mut non_negative = vec![
            ("current_unit_sales", self.current_unit_sales),
            ("current_returns", self.current_returns),
            ("current_unit_cost", self.current_unit_cost),
            ("avg_sale_price", self.avg_sale_price),
            ("development_cost", self.development_cost),
            ("time_to_implement", self.time_to_implement),
        ];
        if let Some(v) = self.annual_unit_sales {
            non_negative.push(("annual_unit_sales", v));
        }
        if let Some(v) = self.annual_returns {
            non_negative.push(("annual_returns", v));
        }
        if let Some(v) = self.return_processing_cost {
            non_negative.push(("return_processing_cost", v));
        }
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite(field));
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeValue { field, value });
            }
        }

        if self.current_returns > self.current_unit_sales {
            return Err(ValidationError::ReturnsExceedSales {
                returns: self.current_returns,
                sales: self.current_unit_sales,
            });
        }

        Ok(())
    }
}

/// Builder for [`ScenarioInputs`].
///
/// # Examples
/// ```
/// use kaizen_core::scenario::ScenarioInputs;
///
/// let inputs = ScenarioInputs::builder("Size Guide", "Trail Shoe")
///     .current_unit_sales(420.0)
///     .current_returns(71.0)
///     .avg_sale_price(129.99)
///     .current_unit_cost(45.75)
///     .development_cost(7500.0)
///     .return_reduction_pct(35.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(inputs.effective_annual_unit_sales(), 420.0 * 12.0);
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioInputsBuilder {
    inputs: ScenarioInputs,
}

impl ScenarioInputsBuilder {
    /// Create a builder with zeroed numeric fields.
    pub fn new(scenario_name: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            inputs: ScenarioInputs {
                scenario_name: scenario_name.into(),
                product_name: product_name.into(),
                ..ScenarioInputs::default()
            },
        }
    }

    /// Set the product category.
    pub fn product_category(mut self, category: impl Into<String>) -> Self {
        self.inputs.product_category = category.into();
        self
    }

    /// Set the sales channel.
    pub fn sales_channel(mut self, channel: impl Into<String>) -> Self {
        self.inputs.sales_channel = channel.into();
        self
    }

    /// Set the lifecycle stage.
    pub fn lifecycle_stage(mut self, stage: LifecycleStage) -> Self {
        self.inputs.product_lifecycle_stage = stage;
        self
    }

    /// Set monthly unit sales.
    pub fn current_unit_sales(mut self, units: f64) -> Self {
        self.inputs.current_unit_sales = units;
        self
    }

    /// Set monthly returns.
    pub fn current_returns(mut self, units: f64) -> Self {
        self.inputs.current_returns = units;
        self
    }

    /// Set the current unit cost.
    pub fn current_unit_cost(mut self, cost: f64) -> Self {
        self.inputs.current_unit_cost = cost;
        self
    }

    /// Set the average sale price.
    pub fn avg_sale_price(mut self, price: f64) -> Self {
        self.inputs.avg_sale_price = price;
        self
    }

    /// Set annual unit sales.
    pub fn annual_unit_sales(mut self, units: f64) -> Self {
        self.inputs.annual_unit_sales = Some(units);
        self
    }

    /// Set annual returns.
    pub fn annual_returns(mut self, units: f64) -> Self {
        self.inputs.annual_returns = Some(units);
        self
    }

    /// Set the upgrade description.
    pub fn upgrade_solution(mut self, solution: impl Into<String>) -> Self {
        self.inputs.upgrade_solution = solution.into();
        self
    }

    /// Set the one-time development cost.
    pub fn development_cost(mut self, cost: f64) -> Self {
        self.inputs.development_cost = cost;
        self
    }

    /// Set the change in unit cost.
    pub fn unit_cost_change(mut self, delta: f64) -> Self {
        self.inputs.unit_cost_change = delta;
        self
    }

    /// Set the estimated return reduction (percent).
    pub fn return_reduction_pct(mut self, pct: f64) -> Self {
        self.inputs.return_reduction_pct = pct;
        self
    }

    /// Set the estimated sales increase (percent).
    pub fn sales_increase_pct(mut self, pct: f64) -> Self {
        self.inputs.sales_increase_pct = pct;
        self
    }

    /// Set the cost of processing one return.
    pub fn return_processing_cost(mut self, cost: f64) -> Self {
        self.inputs.return_processing_cost = Some(cost);
        self
    }

    /// Set the implementation time in months.
    pub fn time_to_implement(mut self, months: f64) -> Self {
        self.inputs.time_to_implement = months;
        self
    }

    /// Set the tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.inputs.tag = Some(tag.into());
        self
    }

    /// Validate and return the inputs.
    pub fn build(self) -> Result<ScenarioInputs, ValidationError> {
        self.inputs.validate()?;
        Ok(self.inputs)
    }

    /// Return the inputs without validation.
    pub fn build_unchecked(self) -> ScenarioInputs {
        self.inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ScenarioInputsBuilder {
        ScenarioInputs::builder("Premium Material", "Apparel XS-450")
            .current_unit_sales(750.0)
            .current_returns(94.0)
            .avg_sale_price(89.99)
            .current_unit_cost(32.50)
            .development_cost(5000.0)
            .return_reduction_pct(30.0)
    }

    #[test]
    fn test_valid_inputs_build() {
        assert!(valid().build().is_ok());
    }

    #[test]
    fn test_missing_scenario_name() {
        let inputs = ScenarioInputs {
            scenario_name: "   ".to_string(),
            ..valid().build_unchecked()
        };
        assert_eq!(
            inputs.validate(),
            Err(ValidationError::MissingField("scenario_name"))
        );
    }

    #[test]
    fn test_missing_product_name() {
        let inputs = ScenarioInputs::builder("Name", "").build();
        assert_eq!(inputs, Err(ValidationError::MissingField("product_name")));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let result = valid().development_cost(-1.0).build();
        assert!(matches!(
            result,
            Err(ValidationError::NegativeValue {
                field: "development_cost",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_unit_cost_change_allowed() {
        assert!(valid().unit_cost_change(-2.5).build().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = valid().sales_increase_pct(f64::NAN).build();
        assert_eq!(result, Err(ValidationError::NonFinite("sales_increase_pct")));

        let result = valid().avg_sale_price(f64::INFINITY).build();
        assert_eq!(result, Err(ValidationError::NonFinite("avg_sale_price")));
    }

    #[test]
    fn test_returns_exceed_sales_rejected() {
        let result = valid().current_returns(800.0).build();
        assert!(matches!(result, Err(ValidationError::ReturnsExceedSales { .. })));
    }

    #[test]
    fn test_zero_sales_allowed() {
        let result = valid().current_unit_sales(0.0).current_returns(0.0).build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_effective_defaults() {
        let inputs = valid().build().unwrap();
        assert_eq!(inputs.effective_annual_unit_sales(), 9000.0);
        assert_eq!(inputs.effective_annual_returns(), 1128.0);
        assert!((inputs.effective_return_processing_cost() - 32.50 * 0.15).abs() < 1e-12);
        assert_eq!(inputs.time_to_implement, 1.0);
    }

    #[test]
    fn test_explicit_annual_values_take_precedence() {
        let inputs = valid()
            .annual_unit_sales(9125.0)
            .annual_returns(1140.0)
            .return_processing_cost(4.90)
            .build()
            .unwrap();
        assert_eq!(inputs.effective_annual_unit_sales(), 9125.0);
        assert_eq!(inputs.effective_annual_returns(), 1140.0);
        assert_eq!(inputs.effective_return_processing_cost(), 4.90);
    }

    #[test]
    fn test_effective_tag_falls_back_to_category() {
        let inputs = valid().product_category("Apparel").build().unwrap();
        assert_eq!(inputs.effective_tag(), "Apparel");

        let tagged = valid().product_category("Apparel").tag("Q3").build().unwrap();
        assert_eq!(tagged.effective_tag(), "Q3");
    }

    #[test]
    fn test_deserialise_tolerates_unknown_and_missing_optional_fields() {
        let json = r#"{
            "scenario_name": "Legacy",
            "product_name": "Widget",
            "current_unit_sales": 100,
            "current_returns": 10,
            "current_unit_cost": 5,
            "avg_sale_price": 12,
            "development_cost": 1000,
            "estimated_return_reduction": 20,
            "roi": 55.5,
            "uid": "ab12cd34"
        }"#;
        let inputs: ScenarioInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.return_reduction_pct, 20.0);
        assert_eq!(inputs.sales_increase_pct, 0.0);
        assert_eq!(inputs.annual_unit_sales, None);
        assert_eq!(inputs.return_processing_cost, None);
        assert_eq!(inputs.time_to_implement, 1.0);
        assert_eq!(inputs.product_lifecycle_stage, LifecycleStage::Growth);
    }

    #[test]
    fn test_deserialise_treats_null_as_absent() {
        let json = r#"{
            "scenario_name": "Exported",
            "product_name": "Widget",
            "product_category": null,
            "sales_channel": null,
            "product_lifecycle_stage": null,
            "current_unit_sales": 100,
            "current_returns": 10,
            "current_unit_cost": 5,
            "avg_sale_price": 12,
            "annual_unit_sales": null,
            "upgrade_solution": null,
            "development_cost": 1000,
            "unit_cost_change": null,
            "return_reduction_pct": 20,
            "sales_increase": null,
            "return_processing_cost": null,
            "time_to_implement": null,
            "tag": null
        }"#;
        let inputs: ScenarioInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.product_category, "");
        assert_eq!(inputs.sales_channel, "");
        assert_eq!(inputs.product_lifecycle_stage, LifecycleStage::Growth);
        assert_eq!(inputs.upgrade_solution, "");
        assert_eq!(inputs.unit_cost_change, 0.0);
        assert_eq!(inputs.sales_increase_pct, 0.0);
        assert_eq!(inputs.time_to_implement, 1.0);
        assert_eq!(inputs.annual_unit_sales, None);
        assert_eq!(inputs.tag, None);
    }

    #[test]
    fn test_deserialise_rejects_missing_required_field() {
        let json = r#"{"scenario_name": "X", "product_name": "Y"}"#;
        assert!(serde_json::from_str::<ScenarioInputs>(json).is_err());
    }
}
