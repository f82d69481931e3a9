/// Generate a router async method that fetches one zone-keyed capability.
///
/// The generated method skips connectors that do not claim the zone or lack
/// the accessor, then defers to `Gridbal::fetch_first` for ordering,
/// timeouts and error collapsing.
///
/// Notes on `not_found` label:
/// - Pass a noun only (e.g., "consumption", "production").
/// - The final error reads "{label} for {ZONE}".
#[macro_export]
macro_rules! gridbal_router_method {
    (
        $(#[$meta:meta])*
        method: $name:ident( $zone_ident:ident : $zone_ty:ty $(, $arg_ident:ident : $arg_ty:ty )* ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        not_found: $not_found:expr,
        call: $call_name:ident( $call_first:ident $(, $call_rest:ident )* )
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "gridbal::router",
                skip(self $(, $arg_ident)*),
                fields(zone = %$zone_ident),
            )
        )]
        ///
        /// # Errors
        /// Returns an error if no eligible connector succeeds or none support the capability.
        pub async fn $name(
            &self,
            $zone_ident: $zone_ty,
            $( $arg_ident: $arg_ty ),*
        ) -> Result<$ret, gridbal_core::GridbalError> {
            self.fetch_first(
                $zone_ident,
                $capability,
                format!("{} for {}", $not_found, $zone_ident),
                move |c| {
                    if !c.supports_zone($zone_ident) {
                        return None;
                    }
                    c.$accessor()?;
                    let $call_first = $zone_ident.clone();
                    $( let $arg_ident = $arg_ident.clone(); )*
                    Some(async move {
                        if let Some(p) = c.$accessor() {
                            p.$call_name(&$call_first $(, $call_rest )*).await
                        } else {
                            Err(gridbal_core::GridbalError::connector(
                                c.name(),
                                concat!("missing ", $not_found, " capability during call"),
                            ))
                        }
                    })
                },
            )
            .await
        }
    };
}
