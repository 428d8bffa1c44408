//! Reconciles the labware a robot reports for a protocol with the labware calibrations stored on the robot.
//!
//! Each physical labware instance is projected into a [`protocol_labware::BaseProtocolLabware`], carrying its
//! identity and the offset of the matching calibration record, and identical instances are then aggregated into
//! [`protocol_labware::LabwareSummary`] values for display.

pub mod identity;
pub mod protocol_labware;
pub mod reconcile;
pub mod record;

#[cfg(any(test, feature = "testing"))]
pub mod fixtures;
