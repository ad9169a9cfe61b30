use crate::insight::types::Coordinates;

/// Host-provided geolocation capability. Best effort: `None` means denied,
/// unavailable or unknown. The bounded wait is applied by the caller.
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    async fn locate(&self) -> Option<Coordinates>;
}

/// The capability is absent entirely (headless host, no position source).
pub struct NoGeolocation;

impl Geolocator for NoGeolocation {
    async fn locate(&self) -> Option<Coordinates> {
        None
    }
}

/// Coordinates pinned in configuration — the desktop stand-in for a
/// browser geolocation prompt.
pub struct FixedLocation(pub Coordinates);

impl Geolocator for FixedLocation {
    async fn locate(&self) -> Option<Coordinates> {
        Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_geolocation_yields_none() {
        assert!(NoGeolocation.locate().await.is_none());
    }

    #[tokio::test]
    async fn fixed_location_yields_pinned_coordinates() {
        let geo = FixedLocation(Coordinates { lat: 37.56, lon: 126.97 });
        let coords = geo.locate().await.unwrap();
        assert_eq!(coords.lat, 37.56);
    }
}
