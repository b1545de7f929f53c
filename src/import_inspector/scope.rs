use crate::import_inspector::present::ChoicePresenter;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Default, Clone)]
pub struct EnableStack {
    regions: Vec<bool>,
}

impl EnableStack {
    pub fn push(&mut self, disabled: bool) {
        self.regions.push(disabled);
    }

    pub fn pop(&mut self) {
        self.regions.pop();
    }

    pub fn enabled(&self) -> bool {
        !self.regions.iter().any(|disabled| *disabled)
    }

    pub fn depth(&self) -> usize {
        self.regions.len()
    }
}

pub struct DisabledScope<'a, P: ChoicePresenter + ?Sized> {
    presenter: &'a mut P,
}

impl<'a, P: ChoicePresenter + ?Sized> DisabledScope<'a, P> {
    pub fn new(presenter: &'a mut P, disabled: bool) -> Self {
        presenter.enable_stack_mut().push(disabled);
        Self { presenter }
    }
}

impl<P: ChoicePresenter + ?Sized> Deref for DisabledScope<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.presenter
    }
}

impl<P: ChoicePresenter + ?Sized> DerefMut for DisabledScope<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.presenter
    }
}

impl<P: ChoicePresenter + ?Sized> Drop for DisabledScope<'_, P> {
    fn drop(&mut self) {
        self.presenter.enable_stack_mut().pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_inspector::present::HeadlessPresenter;

    #[test]
    fn nested_regions_restore_on_drop() {
        let mut presenter = HeadlessPresenter::default();
        {
            let mut outer = presenter.disabled(false);
            assert!(outer.enabled());
            {
                let inner = outer.disabled(true);
                assert!(!inner.enabled());
            }
            assert!(outer.enabled());
        }
        assert_eq!(presenter.enable_stack().depth(), 0);
    }

    #[test]
    fn region_ends_on_early_return() {
        fn draw(presenter: &mut HeadlessPresenter) -> Result<(), ()> {
            let scope = presenter.disabled(true);
            assert!(!scope.enabled());
            Err(())
        }

        let mut presenter = HeadlessPresenter::default();
        assert!(draw(&mut presenter).is_err());
        assert!(presenter.enabled());
        assert_eq!(presenter.enable_stack().depth(), 0);
    }
}
