use super::*;

/// One declarative visibility rule: when the controlling field's value
/// equals the sentinel, one container is shown; a two-way rule also shows
/// the alternate container in the other case, a toggle simply hides its
/// container. Rules are fixed at registration and independent of each
/// other.
#[derive(Debug, Clone)]
pub struct VisibilityRule<H> {
    control: H,
    sentinel: String,
    shown_on_match: H,
    shown_otherwise: Option<H>,
}

impl<H: Copy> VisibilityRule<H> {
    /// Mutually exclusive pair: exactly one of the two containers is shown.
    pub fn two_way(
        control: H,
        sentinel: impl Into<String>,
        shown_on_match: H,
        shown_otherwise: H,
    ) -> Self {
        Self {
            control,
            sentinel: sentinel.into(),
            shown_on_match,
            shown_otherwise: Some(shown_otherwise),
        }
    }

    /// Single container, shown on match and hidden otherwise.
    pub fn toggle(control: H, sentinel: impl Into<String>, shown_on_match: H) -> Self {
        Self {
            control,
            sentinel: sentinel.into(),
            shown_on_match,
            shown_otherwise: None,
        }
    }

    pub fn control(&self) -> H {
        self.control
    }

    /// Evaluates the rule against the controlling field's current value.
    pub fn apply<S>(&self, surface: &mut S) -> Result<()>
    where
        S: PresentationSurface<Handle = H>,
    {
        let matched = surface.field_value(self.control)? == self.sentinel;
        surface.set_container_visibility(self.shown_on_match, matched)?;
        if let Some(container) = self.shown_otherwise {
            surface.set_container_visibility(container, !matched)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::test_support::RecordingSurface;

    #[test]
    fn two_way_rule_shows_exactly_one_container() -> Result<()> {
        // Slot 0 is the control, 1 and 2 the containers.
        let rule = VisibilityRule::two_way(0usize, "percentage_change", 1, 2);

        let mut surface = RecordingSurface::with_fields(&["percentage_change", "", ""]);
        rule.apply(&mut surface)?;
        assert_eq!(surface.visible[1], Some(true));
        assert_eq!(surface.visible[2], Some(false));

        surface.values[0] = "price_drop".to_string();
        rule.apply(&mut surface)?;
        assert_eq!(surface.visible[1], Some(false));
        assert_eq!(surface.visible[2], Some(true));
        Ok(())
    }

    #[test]
    fn toggle_rule_touches_only_its_own_container() -> Result<()> {
        let rule = VisibilityRule::toggle(0usize, "custom", 1);

        let mut surface = RecordingSurface::with_fields(&["daily", "", "unrelated"]);
        rule.apply(&mut surface)?;
        assert_eq!(surface.visible[1], Some(false));
        assert_eq!(surface.visible[2], None);

        surface.values[0] = "custom".to_string();
        rule.apply(&mut surface)?;
        assert_eq!(surface.visible[1], Some(true));
        assert_eq!(surface.visible[2], None);
        Ok(())
    }
}
