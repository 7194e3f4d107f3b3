//! Option validation
//!
//! Validates the flag combinations of the `packages` command before any
//! resource is loaded. Checks are presence based: a flag given as
//! `--force=false` still counts as given.

use crate::error::{CombinationKind, OptionError};

/// Flag name for listing packages
pub const LIST: &str = "--list";
/// Flag name for installing packages
pub const INSTALL: &str = "--install";
/// Flag name for uninstalling packages
pub const UNINSTALL: &str = "--uninstall";
/// Flag name for forced reinstall
pub const FORCE: &str = "--force";
/// Display name for the positional package specs
pub const PACKAGES: &str = "PACKAGES";

/// Whether an option was supplied on the command line, and with which value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// Not given
    #[default]
    Absent,
    /// Given, with the parsed value
    Present(bool),
}

impl Presence {
    /// Presence of a switch that takes no value (given means true)
    pub fn from_switch(given: bool) -> Self {
        if given {
            Self::Present(true)
        } else {
            Self::Absent
        }
    }

    /// Presence of a flag parsed as `Option<bool>`
    pub fn from_optional(value: Option<bool>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }

    /// True when the flag was supplied, regardless of its value
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Effective value; absent flags are false
    pub fn value(self) -> bool {
        matches!(self, Self::Present(true))
    }
}

/// The action selected by a valid option set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagesAction {
    /// `--list`
    List,
    /// `--install`
    Install,
    /// `--uninstall`
    Uninstall,
}

/// Options supplied to the `packages` command
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    pub list: Presence,
    pub install: Presence,
    pub uninstall: Presence,
    pub force: Presence,
    pub yes: Presence,
    pub verbose: Presence,
    /// Platform id override
    pub platform: Option<String>,
    /// Raw package spec tokens
    pub packages: Vec<String>,
}

impl OptionSet {
    /// Validate the combination and return the selected action
    ///
    /// Rules, checked in order:
    /// - exactly one of `--list`, `--install`, `--uninstall`
    /// - at most one of `--list`, `--force`
    /// - at most one of `--uninstall`, `--force`
    /// - at most one of `--list`, package arguments
    pub fn validate(&self) -> Result<PackagesAction, OptionError> {
        let has_packages = !self.packages.is_empty();

        check_exactly_one(&[
            (LIST, self.list.is_present()),
            (INSTALL, self.install.is_present()),
            (UNINSTALL, self.uninstall.is_present()),
        ])?;
        check_at_most_one(&[(LIST, self.list.is_present()), (FORCE, self.force.is_present())])?;
        check_at_most_one(&[
            (UNINSTALL, self.uninstall.is_present()),
            (FORCE, self.force.is_present()),
        ])?;
        check_at_most_one(&[(LIST, self.list.is_present()), (PACKAGES, has_packages)])?;

        let action = if self.install.is_present() {
            PackagesAction::Install
        } else if self.uninstall.is_present() {
            PackagesAction::Uninstall
        } else {
            PackagesAction::List
        };
        Ok(action)
    }
}

/// Fail unless exactly one of the named options is present
pub fn check_exactly_one(params: &[(&str, bool)]) -> Result<(), OptionError> {
    let present = present_names(params);
    match present.len() {
        1 => Ok(()),
        0 => Err(OptionError::InvalidOptionCombination {
            kind: CombinationKind::Missing,
            options: params.iter().map(|(name, _)| (*name).to_string()).collect(),
        }),
        _ => Err(OptionError::InvalidOptionCombination {
            kind: CombinationKind::Conflict,
            options: present,
        }),
    }
}

/// Fail if more than one of the named options is present
pub fn check_at_most_one(params: &[(&str, bool)]) -> Result<(), OptionError> {
    let present = present_names(params);
    if present.len() > 1 {
        return Err(OptionError::InvalidOptionCombination {
            kind: CombinationKind::Conflict,
            options: present,
        });
    }
    Ok(())
}

fn present_names(params: &[(&str, bool)]) -> Vec<String> {
    params
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| (*name).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn options(list: bool, install: bool, uninstall: bool) -> OptionSet {
        OptionSet {
            list: Presence::from_switch(list),
            install: Presence::from_switch(install),
            uninstall: Presence::from_switch(uninstall),
            ..OptionSet::default()
        }
    }

    fn conflict(names: &[&str]) -> OptionError {
        OptionError::InvalidOptionCombination {
            kind: CombinationKind::Conflict,
            options: names.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_presence_tri_state() {
        assert!(!Presence::Absent.is_present());
        assert!(Presence::Present(false).is_present());
        assert!(!Presence::Present(false).value());
        assert!(Presence::Present(true).value());
        assert_eq!(Presence::from_optional(None), Presence::Absent);
        assert_eq!(Presence::from_optional(Some(false)), Presence::Present(false));
        assert_eq!(Presence::from_switch(false), Presence::Absent);
    }

    #[test]
    fn test_single_action_selects_it() {
        assert_eq!(options(true, false, false).validate(), Ok(PackagesAction::List));
        assert_eq!(options(false, true, false).validate(), Ok(PackagesAction::Install));
        assert_eq!(options(false, false, true).validate(), Ok(PackagesAction::Uninstall));
    }

    #[test]
    fn test_no_action_names_all_three() {
        let err = options(false, false, false).validate().unwrap_err();
        assert_eq!(
            err,
            OptionError::InvalidOptionCombination {
                kind: CombinationKind::Missing,
                options: vec![LIST.to_string(), INSTALL.to_string(), UNINSTALL.to_string()],
            }
        );
    }

    #[test]
    fn test_two_actions_name_only_the_given_ones() {
        let err = options(true, false, true).validate().unwrap_err();
        assert_eq!(err, conflict(&[LIST, UNINSTALL]));
    }

    #[test]
    fn test_list_with_force_rejected() {
        let mut set = options(true, false, false);
        set.force = Presence::Present(true);
        assert_eq!(set.validate().unwrap_err(), conflict(&[LIST, FORCE]));
    }

    #[test]
    fn test_explicit_false_still_counts_as_present() {
        let mut set = options(false, false, true);
        set.force = Presence::Present(false);
        assert_eq!(set.validate().unwrap_err(), conflict(&[UNINSTALL, FORCE]));
    }

    #[test]
    fn test_install_with_force_accepted() {
        let mut set = options(false, true, false);
        set.force = Presence::Present(true);
        set.packages = vec!["oss-cad-suite".to_string()];
        assert_eq!(set.validate(), Ok(PackagesAction::Install));
    }

    #[test]
    fn test_list_with_packages_rejected() {
        let mut set = options(true, false, false);
        set.packages = vec!["examples".to_string()];
        assert_eq!(set.validate().unwrap_err(), conflict(&[LIST, PACKAGES]));
    }

    #[test]
    fn test_yes_and_verbose_never_conflict() {
        let mut set = options(true, false, false);
        set.yes = Presence::Present(true);
        set.verbose = Presence::Present(true);
        set.platform = Some("linux_x86_64".to_string());
        assert_eq!(set.validate(), Ok(PackagesAction::List));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Accepts iff exactly one action is given and no pairwise rule is broken
        #[test]
        fn prop_validator_accepts_iff_rules_hold(
            list in any::<bool>(),
            install in any::<bool>(),
            uninstall in any::<bool>(),
            force in proptest::option::of(any::<bool>()),
            has_packages in any::<bool>(),
        ) {
            let mut set = options(list, install, uninstall);
            set.force = Presence::from_optional(force);
            if has_packages {
                set.packages = vec!["examples".to_string()];
            }

            let actions = [list, install, uninstall].iter().filter(|b| **b).count();
            let force_given = force.is_some();
            let expected_ok = actions == 1
                && !(list && force_given)
                && !(uninstall && force_given)
                && !(list && has_packages);

            let result = set.validate();
            prop_assert_eq!(result.is_ok(), expected_ok);

            if let Err(err) = result {
                prop_assert!(!err.options().is_empty());
                prop_assert!(err.to_string().contains("'--"));
            }
        }

        /// Validation is deterministic
        #[test]
        fn prop_validator_is_deterministic(
            list in any::<bool>(),
            install in any::<bool>(),
            uninstall in any::<bool>(),
        ) {
            let set = options(list, install, uninstall);
            prop_assert_eq!(set.validate(), set.validate());
        }
    }
}
