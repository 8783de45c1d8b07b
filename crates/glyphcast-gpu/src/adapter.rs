#![forbid(unsafe_code)]

//! Adapter acquisition as an ordered list of fallback attempts.

#[cfg(feature = "tracing")]
use tracing::info;

/// GPU power preference requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerPreference {
    /// Prefer the battery-friendly adapter.
    LowPower,
    /// Prefer the discrete/performant adapter.
    HighPerformance,
}

/// One adapter-request configuration variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdapterOptions {
    /// Requested power preference, if any.
    pub power_preference: Option<PowerPreference>,
    /// Ask for the software/compatibility fallback adapter.
    pub force_fallback_adapter: bool,
}

/// Default attempt ladder, tried in order: high-performance, low-power,
/// platform default (`None`), forced fallback adapter.
pub const DEFAULT_ATTEMPTS: &[Option<AdapterOptions>] = &[
    Some(AdapterOptions {
        power_preference: Some(PowerPreference::HighPerformance),
        force_fallback_adapter: false,
    }),
    Some(AdapterOptions {
        power_preference: Some(PowerPreference::LowPower),
        force_fallback_adapter: false,
    }),
    None,
    Some(AdapterOptions {
        power_preference: None,
        force_fallback_adapter: true,
    }),
];

/// Host collaborator that can request GPU adapters.
pub trait AdapterProvider {
    /// Opaque adapter handle.
    type Adapter;
    /// Error raised by a single request attempt.
    type Error;

    /// Whether the GPU capability exists at all on this host.
    ///
    /// When this is false, acquisition yields `Ok(None)` without trying
    /// anything.
    fn is_available(&self) -> bool {
        true
    }

    /// Request an adapter. `None` options means the platform default
    /// request. `Ok(None)` means the request completed but no adapter
    /// matched.
    fn request_adapter(
        &mut self,
        options: Option<&AdapterOptions>,
    ) -> Result<Option<Self::Adapter>, Self::Error>;
}

/// Try `attempts` in order and return the first adapter obtained.
///
/// An empty attempt slice falls back to [`DEFAULT_ATTEMPTS`]. Attempt errors
/// are remembered but do not stop the scan; the last error is returned only
/// if no attempt succeeded. If every attempt completed without an adapter
/// and without an error, the result is `Ok(None)`.
pub fn acquire_adapter<P>(
    provider: &mut P,
    attempts: &[Option<AdapterOptions>],
) -> Result<Option<P::Adapter>, P::Error>
where
    P: AdapterProvider,
{
    if !provider.is_available() {
        return Ok(None);
    }
    let attempts = if attempts.is_empty() {
        DEFAULT_ATTEMPTS
    } else {
        attempts
    };

    let mut last_error = None;
    for options in attempts {
        match provider.request_adapter(options.as_ref()) {
            Ok(Some(adapter)) => {
                #[cfg(feature = "tracing")]
                match options {
                    Some(o) if o.force_fallback_adapter => info!("using fallback adapter"),
                    Some(AdapterOptions {
                        power_preference: Some(pref),
                        ..
                    }) => info!(?pref, "adapter obtained"),
                    _ => info!("adapter obtained with default options"),
                }
                return Ok(Some(adapter));
            }
            Ok(None) => {}
            Err(err) => last_error = Some(err),
        }
    }

    match last_error {
        Some(err) => Err(err),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Scripted provider: each entry is the outcome of one request.
    struct Scripted {
        available: bool,
        outcomes: Vec<Result<Option<&'static str>, &'static str>>,
        seen: Vec<Option<AdapterOptions>>,
    }

    impl Scripted {
        fn new(outcomes: Vec<Result<Option<&'static str>, &'static str>>) -> Self {
            Self {
                available: true,
                outcomes,
                seen: Vec::new(),
            }
        }
    }

    impl AdapterProvider for Scripted {
        type Adapter = &'static str;
        type Error = &'static str;

        fn is_available(&self) -> bool {
            self.available
        }

        fn request_adapter(
            &mut self,
            options: Option<&AdapterOptions>,
        ) -> Result<Option<&'static str>, &'static str> {
            self.seen.push(options.copied());
            self.outcomes.remove(0)
        }
    }

    #[test]
    fn first_success_wins() {
        let mut p = Scripted::new(vec![Ok(None), Ok(Some("low-power")), Ok(Some("default"))]);
        let got = acquire_adapter(&mut p, DEFAULT_ATTEMPTS).unwrap();
        assert_eq!(got, Some("low-power"));
        // Stops after the winning attempt.
        assert_eq!(p.seen.len(), 2);
        assert_eq!(
            p.seen[1].unwrap().power_preference,
            Some(PowerPreference::LowPower)
        );
    }

    #[test]
    fn errors_do_not_stop_the_scan() {
        let mut p = Scripted::new(vec![Err("boom"), Ok(Some("fallback"))]);
        let got = acquire_adapter(&mut p, DEFAULT_ATTEMPTS).unwrap();
        assert_eq!(got, Some("fallback"));
    }

    #[test]
    fn last_error_surfaces_when_nothing_succeeds() {
        let mut p = Scripted::new(vec![Err("first"), Ok(None), Err("last"), Ok(None)]);
        let got = acquire_adapter(&mut p, DEFAULT_ATTEMPTS);
        assert_eq!(got, Err("last"));
    }

    #[test]
    fn all_empty_yields_none_without_error() {
        let mut p = Scripted::new(vec![Ok(None); 4]);
        let got = acquire_adapter(&mut p, DEFAULT_ATTEMPTS).unwrap();
        assert_eq!(got, None);
        assert_eq!(p.seen.len(), 4);
    }

    #[test]
    fn unavailable_host_short_circuits() {
        let mut p = Scripted::new(vec![]);
        p.available = false;
        let got = acquire_adapter(&mut p, DEFAULT_ATTEMPTS).unwrap();
        assert_eq!(got, None);
        assert!(p.seen.is_empty());
    }

    #[test]
    fn empty_attempts_use_the_default_ladder() {
        let mut p = Scripted::new(vec![Ok(None); 4]);
        let _ = acquire_adapter(&mut p, &[]).unwrap();
        let prefs: Vec<_> = p
            .seen
            .iter()
            .map(|o| o.map(|o| (o.power_preference, o.force_fallback_adapter)))
            .collect();
        assert_eq!(
            prefs,
            vec![
                Some((Some(PowerPreference::HighPerformance), false)),
                Some((Some(PowerPreference::LowPower), false)),
                None,
                Some((None, true)),
            ]
        );
    }

    #[test]
    fn custom_attempts_override_the_ladder() {
        let custom = [Some(AdapterOptions {
            power_preference: None,
            force_fallback_adapter: true,
        })];
        let mut p = Scripted::new(vec![Ok(Some("fallback"))]);
        let got = acquire_adapter(&mut p, &custom).unwrap();
        assert_eq!(got, Some("fallback"));
        assert_eq!(p.seen.len(), 1);
        assert!(p.seen[0].unwrap().force_fallback_adapter);
    }
}
