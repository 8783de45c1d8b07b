#![forbid(unsafe_code)]

//! Surface setup and sizing helpers.

use core::fmt;

use crate::adapter::{AdapterOptions, AdapterProvider, acquire_adapter};

/// Texture formats a host may report as its preferred surface format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, unsigned normalized.
    Rgba8Unorm,
    /// 8-bit BGRA, unsigned normalized.
    Bgra8Unorm,
}

/// Surface alpha compositing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    /// Alpha is ignored.
    Opaque,
    /// Color channels are premultiplied by alpha.
    Premultiplied,
}

/// Configuration applied to a surface target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Pixel format for presented frames.
    pub format: TextureFormat,
    /// Compositing mode.
    pub alpha_mode: AlphaMode,
}

/// Host canvas/surface collaborator.
pub trait SurfaceTarget {
    /// Apply a configuration. Returns false when the host cannot provide a
    /// presentation context for this surface.
    fn configure(&mut self, config: &SurfaceConfig) -> bool;
}

/// Provider that can also produce a device from an acquired adapter.
pub trait DeviceProvider: AdapterProvider {
    /// Opaque device handle.
    type Device;

    /// Request a device from an adapter.
    fn request_device(&mut self, adapter: &Self::Adapter) -> Result<Self::Device, Self::Error>;

    /// The host's preferred surface format.
    fn preferred_format(&self) -> TextureFormat;
}

/// Why surface setup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError<E> {
    /// The host has no GPU capability.
    Unsupported,
    /// Every acquisition attempt completed without an adapter.
    NoAdapter,
    /// The surface refused to configure (no presentation context).
    NoContext,
    /// A provider call errored and nothing succeeded after it.
    Provider(E),
}

impl<E: fmt::Display> fmt::Display for SetupError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "gpu capability not supported on this host"),
            Self::NoAdapter => write!(f, "unable to obtain gpu adapter after fallback attempts"),
            Self::NoContext => write!(f, "unable to obtain presentation context"),
            Self::Provider(err) => write!(f, "gpu provider error: {err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for SetupError<E> {}

/// A configured surface: the device to render with and the format in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSetup<D> {
    /// Device obtained from the winning adapter.
    pub device: D,
    /// Format the surface was configured with.
    pub format: TextureFormat,
}

/// Acquire an adapter (trying `attempts`, or the default ladder when empty),
/// request a device, and configure `target` with the host's preferred format
/// and premultiplied alpha.
pub fn setup_surface<P, T>(
    provider: &mut P,
    target: &mut T,
    attempts: &[Option<AdapterOptions>],
) -> Result<SurfaceSetup<P::Device>, SetupError<P::Error>>
where
    P: DeviceProvider,
    T: SurfaceTarget,
{
    if !provider.is_available() {
        return Err(SetupError::Unsupported);
    }
    let adapter = match acquire_adapter(provider, attempts) {
        Ok(Some(adapter)) => adapter,
        Ok(None) => return Err(SetupError::NoAdapter),
        Err(err) => return Err(SetupError::Provider(err)),
    };
    let device = provider
        .request_device(&adapter)
        .map_err(SetupError::Provider)?;
    let format = provider.preferred_format();
    let configured = target.configure(&SurfaceConfig {
        format,
        alpha_mode: AlphaMode::Premultiplied,
    });
    if !configured {
        return Err(SetupError::NoContext);
    }
    Ok(SurfaceSetup { device, format })
}

/// Physical surface size for a CSS size at a device pixel ratio.
///
/// The ratio is clamped to `[1, 3]` (non-finite treated as 1) to bound
/// memory on high-density displays; each physical extent is the rounded
/// product, with non-finite or non-positive products mapping to 0.
pub fn physical_surface_size(css_w: f64, css_h: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.clamp(1.0, 3.0)
    } else {
        1.0
    };
    (physical_extent(css_w, dpr), physical_extent(css_h, dpr))
}

fn physical_extent(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).round();
    if px.is_finite() && px > 0.0 { px as u32 } else { 0 }
}

/// Whether GPU features may be used in this page context.
///
/// True over HTTPS and on localhost loopback hosts.
pub fn is_secure_context(protocol: &str, hostname: &str) -> bool {
    protocol.eq_ignore_ascii_case("https:") || hostname == "localhost" || hostname == "127.0.0.1"
}
