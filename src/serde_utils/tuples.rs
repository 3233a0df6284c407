// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Implement string accessors and conversions for string wrapper tuples.
///
/// # Example
///
/// `pub struct MyWrapper(pub String);`
/// `impl_wrapper_str!(MyWrapper);`
#[macro_export]
macro_rules! impl_wrapper_str {
    ($typ:ty) => {
        impl $typ {
            /// Returns `as_str()` of the inner string.
            #[allow(unused)]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// Returns `is_empty()` of the inner string.
            #[allow(unused)]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<str> for $typ {
            fn as_ref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl std::borrow::Borrow<str> for $typ {
            fn borrow(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $typ {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<&str> for $typ {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $typ {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl PartialEq<str> for $typ {
            fn eq(&self, other: &str) -> bool {
                self.0.as_str() == other
            }
        }
    };
}
