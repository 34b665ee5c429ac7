//! Model parameters bundled with the curves they are calibrated to.

use crate::{
    G2ppPiecewiseConstantParameters, HullWhiteOneFactorPiecewiseConstantParameters,
    LiborMarketModelDisplacedDiffusionParameters,
};
use irmc_core::Currency;
use irmc_termstructures::MulticurveProvider;
use std::sync::Arc;

macro_rules! model_provider {
    ($(#[$doc:meta])* $name:ident, $params:ty) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            parameters: $params,
            currency: Currency,
            multicurve: Arc<dyn MulticurveProvider>,
        }

        impl $name {
            /// Bundle `parameters`, valid for `currency`, with `multicurve`.
            pub fn new(
                parameters: $params,
                currency: Currency,
                multicurve: Arc<dyn MulticurveProvider>,
            ) -> Self {
                Self {
                    parameters,
                    currency,
                    multicurve,
                }
            }

            /// Model parameters.
            pub fn parameters(&self) -> &$params {
                &self.parameters
            }

            /// Currency the model applies to.
            pub fn currency(&self) -> &Currency {
                &self.currency
            }

            /// Underlying curves.
            pub fn multicurve(&self) -> &dyn MulticurveProvider {
                self.multicurve.as_ref()
            }

            /// Same parameters on different curves.
            pub fn with_multicurve(&self, multicurve: Arc<dyn MulticurveProvider>) -> Self {
                Self {
                    parameters: self.parameters.clone(),
                    currency: self.currency.clone(),
                    multicurve,
                }
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("parameters", &self.parameters)
                    .field("currency", &self.currency)
                    .finish_non_exhaustive()
            }
        }
    };
}

model_provider!(
    /// Hull-White one-factor parameters with their curves.
    HullWhiteOneFactorProvider,
    HullWhiteOneFactorPiecewiseConstantParameters
);

model_provider!(
    /// G2++ parameters with their curves.
    G2ppProvider,
    G2ppPiecewiseConstantParameters
);

model_provider!(
    /// Displaced-diffusion LMM parameters with their curves.
    LiborMarketModelDisplacedDiffusionProvider,
    LiborMarketModelDisplacedDiffusionParameters
);
