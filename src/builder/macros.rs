//! Macros for declaring identifier vocabularies.

/// Declare an enum usable as a state or event identifier.
///
/// The enum gets the derives the engine needs, and a `Display` impl that
/// prints each variant's name, or a custom label when one is given.
/// Variants order by declaration.
///
/// # Example
///
/// ```
/// use turnstile::{identifier_enum, StateMachine};
///
/// identifier_enum! {
///     pub enum Phase {
///         Idle,
///         Playing = "playing",
///     }
/// }
///
/// identifier_enum! {
///     pub enum Command {
///         Play,
///         Stop,
///     }
/// }
///
/// let machine: StateMachine<Phase, Command> = StateMachine::default();
/// machine.add_transition(Phase::Idle, Command::Play, Phase::Playing);
/// assert_eq!(Phase::Playing.to_string(), "playing");
/// assert_eq!(machine.valid_events(&Phase::Idle), vec![Command::Play]);
/// ```
#[macro_export]
macro_rules! identifier_enum {
    (@label $variant:ident $label:literal) => { $label };
    (@label $variant:ident) => { stringify!($variant) };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let label = match self {
                    $(Self::$variant => $crate::identifier_enum!(@label $variant $($label)?)),*
                };
                f.write_str(label)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Identifier;

    identifier_enum! {
        enum Light {
            Red,
            Yellow = "amber",
            Green,
        }
    }

    fn assert_identifier<T: Identifier>() {}

    #[test]
    fn identifier_enum_implements_identifier() {
        assert_identifier::<Light>();
    }

    #[test]
    fn display_uses_name_or_label() {
        assert_eq!(Light::Red.to_string(), "Red");
        assert_eq!(Light::Yellow.to_string(), "amber");
    }

    #[test]
    fn variants_order_by_declaration() {
        assert!(Light::Red < Light::Yellow);
        assert!(Light::Yellow < Light::Green);
    }

    #[test]
    fn identifier_enum_supports_visibility() {
        identifier_enum! {
            pub enum PublicPhase {
                A,
                B,
            }
        }

        let _phase = PublicPhase::A;
    }
}
