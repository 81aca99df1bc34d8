use super::*;

/// How many elements `install_widgets` handed to the toolkit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetCount {
    pub tooltips: usize,
    pub toasts: usize,
}

/// Hands every tooltip trigger and toast element to the toolkit, once each.
pub fn install_widgets(page: &mut Page, toolkit: &mut dyn WidgetToolkit) -> Result<WidgetCount> {
    let mut count = WidgetCount::default();
    for element in page.query_all("[data-bs-toggle=\"tooltip\"]")? {
        toolkit.tooltip(element);
        count.tooltips += 1;
    }
    for element in page.query_all(".toast")? {
        toolkit.toast(element);
        count.toasts += 1;
    }
    Ok(count)
}

/// Wires the destructive-action confirmation onto every confirm-delete
/// form; declining the prompt prevents the submission.
pub fn install_confirm_delete(page: &mut Page) -> Result<usize> {
    let forms = page.query_all("form.confirm-delete-form")?;
    for &form in &forms {
        page.add_listener(form, EventKind::Submit, Behavior::ConfirmSubmit);
    }
    Ok(forms.len())
}

/// Wires allow-list validation onto every URL-typed input, run on blur.
pub fn install_url_validation(page: &mut Page) -> Result<usize> {
    let inputs = page.query_all("input[type=\"url\"]")?;
    if inputs.is_empty() {
        return Ok(0);
    }
    let validator = UrlValidator::new()?;
    for &input in &inputs {
        page.add_listener(
            input,
            EventKind::Blur,
            Behavior::ValidateUrl(validator.clone()),
        );
    }
    Ok(inputs.len())
}

/// Wires digit normalization onto every opted-in field, run on blur.
pub fn install_digit_normalization(page: &mut Page) -> Result<usize> {
    let inputs = page.query_all(".arabic-numeral-convert")?;
    for &input in &inputs {
        page.add_listener(input, EventKind::Blur, Behavior::NormalizeDigits);
    }
    Ok(inputs.len())
}

/// Registers the standard visibility rules present on this page, skipping
/// any whose controlling field or containers are absent. Each registered
/// rule is applied once immediately, so restored or default form values
/// render consistently before any interaction.
pub fn install_field_visibility(page: &mut Page) -> Result<usize> {
    let mut installed = 0;
    for rule in [alert_type_rule(page), interval_rule(page)]
        .into_iter()
        .flatten()
    {
        rule.apply(page)?;
        page.add_listener(
            rule.control(),
            EventKind::Change,
            Behavior::ApplyVisibility(rule),
        );
        installed += 1;
    }
    Ok(installed)
}

/// The alert form's rule: `percentage_change` shows the percentage
/// threshold and hides the target price; any other alert type the inverse.
fn alert_type_rule(page: &Page) -> Option<VisibilityRule<NodeId>> {
    let control = page.element_by_id("alert_type")?;
    let target_price = page.container_of("target_price")?;
    let percentage = page.container_of("percentage_threshold")?;
    Some(VisibilityRule::two_way(
        control,
        "percentage_change",
        percentage,
        target_price,
    ))
}

/// The scheduler form's rule: only `custom` shows the custom interval.
fn interval_rule(page: &Page) -> Option<VisibilityRule<NodeId>> {
    let control = page.element_by_id("interval")?;
    let custom = page.container_of("custom_interval")?;
    Some(VisibilityRule::toggle(control, "custom", custom))
}

/// The composing entry point: installs every behavior the page's markup
/// calls for. Pages lacking any of the optional elements silently skip
/// the corresponding behavior.
pub fn install_all(page: &mut Page, toolkit: &mut dyn WidgetToolkit) -> Result<()> {
    install_widgets(page, toolkit)?;
    install_confirm_delete(page)?;
    install_url_validation(page)?;
    install_digit_normalization(page)?;
    install_field_visibility(page)?;
    Ok(())
}
