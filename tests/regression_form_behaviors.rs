use page_behaviors::{
    CONFIRM_DELETE_MESSAGE, ConfirmPrompt, INVALID_CLASS, INVALID_URL_MESSAGE, Page,
    RecordingToolkit, ScriptedPrompt, SubmitOutcome, VALID_CLASS, install_all,
};

const ALERT_PAGE: &str = r#"
    <div class='container'>
        <div class='toast' role='alert'>Alert saved.</div>
        <form id='new-alert' method='post'>
            <div class='mb-3'>
                <label for='product-url'>Product URL</label>
                <input id='product-url' type='url' class='form-control' name='url'>
                <span data-bs-toggle='tooltip' title='Paste a Salla or Zid product link'>?</span>
            </div>
            <div class='mb-3'>
                <select id='alert_type' class='form-select' name='alert_type'>
                    <option value='price_below'>Price drops below</option>
                    <option value='percentage_change'>Percentage change</option>
                </select>
            </div>
            <div class='mb-3' id='target-price-group'>
                <label for='target_price'>Target price</label>
                <input id='target_price' class='form-control arabic-numeral-convert' name='target_price'>
            </div>
            <div class='mb-3' id='percentage-group'>
                <label for='percentage_threshold'>Percentage threshold</label>
                <input id='percentage_threshold' class='form-control arabic-numeral-convert' name='percentage_threshold'>
            </div>
        </form>
        <form id='delete-alert' class='confirm-delete-form' method='post'>
            <button type='submit' class='btn btn-danger'>Delete</button>
        </form>
    </div>
"#;

#[test]
fn full_alert_page_workflow() -> page_behaviors::Result<()> {
    let mut page = Page::from_html(ALERT_PAGE)?;
    let mut toolkit = RecordingToolkit::default();
    install_all(&mut page, &mut toolkit)?;

    assert_eq!(toolkit.tooltips.len(), 1);
    assert_eq!(toolkit.toasts.len(), 1);

    // Mistyped URL gets inline feedback.
    page.type_text("#product-url", "https://noon.com/item/3")?;
    page.blur("#product-url")?;
    assert!(page.has_class("#product-url", INVALID_CLASS)?);
    assert_eq!(
        page.feedback_message("#product-url")?.as_deref(),
        Some(INVALID_URL_MESSAGE)
    );

    // Corrected URL clears it.
    page.type_text("#product-url", "https://shop.salla.com/product/3")?;
    page.blur("#product-url")?;
    assert!(page.has_class("#product-url", VALID_CLASS)?);
    assert!(!page.has_class("#product-url", INVALID_CLASS)?);
    assert_eq!(page.feedback_message("#product-url")?, None);
    assert!(!page.exists(".invalid-feedback")?);

    // Default alert type shows the target price group only.
    assert!(page.is_visible("#target-price-group")?);
    assert!(!page.is_visible("#percentage-group")?);

    page.select_value("#alert_type", "percentage_change")?;
    assert!(!page.is_visible("#target-price-group")?);
    assert!(page.is_visible("#percentage-group")?);

    // Arabic-Indic price entry is normalized on blur.
    page.type_text("#percentage_threshold", "٢٥")?;
    page.blur("#percentage_threshold")?;
    page.assert_value("#percentage_threshold", "25")?;

    Ok(())
}

#[test]
fn delete_confirmation_declines_then_accepts() -> page_behaviors::Result<()> {
    let mut page = Page::from_html(ALERT_PAGE)?;
    let mut toolkit = RecordingToolkit::default();
    install_all(&mut page, &mut toolkit)?;

    page.set_confirm_prompt(Box::new(ScriptedPrompt::new([false, true])));
    assert_eq!(page.submit("#delete-alert")?, SubmitOutcome::Prevented);
    assert_eq!(page.submit("#delete-alert")?, SubmitOutcome::Proceeded);
    Ok(())
}

#[test]
fn delete_confirmation_asks_with_the_fixed_message() -> page_behaviors::Result<()> {
    #[derive(Debug)]
    struct ExpectFixedMessage;

    impl ConfirmPrompt for ExpectFixedMessage {
        fn confirm(&mut self, message: &str) -> bool {
            assert_eq!(message, CONFIRM_DELETE_MESSAGE);
            false
        }
    }

    let mut page = Page::from_html(ALERT_PAGE)?;
    let mut toolkit = RecordingToolkit::default();
    install_all(&mut page, &mut toolkit)?;

    page.set_confirm_prompt(Box::new(ExpectFixedMessage));
    assert_eq!(page.submit("#delete-alert")?, SubmitOutcome::Prevented);
    Ok(())
}

#[test]
fn repeated_validation_never_stacks_feedback_elements() -> page_behaviors::Result<()> {
    let mut page = Page::from_html(ALERT_PAGE)?;
    let mut toolkit = RecordingToolkit::default();
    install_all(&mut page, &mut toolkit)?;

    page.type_text("#product-url", "ftp://nowhere.example")?;
    for _ in 0..5 {
        page.blur("#product-url")?;
    }

    assert_eq!(
        page.feedback_message("#product-url")?.as_deref(),
        Some(INVALID_URL_MESSAGE)
    );
    // The feedback stays a single element directly after the field: the
    // element after it is the tooltip trigger from the original markup.
    assert!(page.exists(".invalid-feedback")?);
    assert!(page.exists("[data-bs-toggle=\"tooltip\"]")?);
    Ok(())
}
