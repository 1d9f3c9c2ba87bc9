// ==========================================
// Power Export Diff - record type registry
// ==========================================
// The closed catalog of record types produced by the
// power-study export tool, as one declarative table.
// Identity is data, not code: which properties form a
// type's composite key is read from this table,
// never special-cased in logic.
//
// Conventions:
// - equipment types key on EquipmentID (branches add
//   ToBus, since branch ids repeat per terminal pair)
// - per-scenario result types key on Scenario then
//   EquipmentID, in that order
// ==========================================

use super::PropertyKind::{Numeric, Text};
use super::TypeSpec;

pub(crate) const RECORD_TYPES: &[TypeSpec] = &[
    TypeSpec {
        name: "Bus",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("BaseKV", Numeric),
            ("NoOfPhases", Numeric),
            ("BusType", Text),
            ("Status", Text),
            ("Area", Text),
            ("Zone", Text),
            ("LegacyID", Text),
        ],
        deprecated: &["LegacyID"],
    },
    TypeSpec {
        name: "Breaker",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKV", Numeric),
            ("ContinuousAmps", Numeric),
            ("InterruptingKA", Numeric),
            ("TripUnitType", Text),
            ("Status", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Switch",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKV", Numeric),
            ("ContinuousAmps", Numeric),
            ("Status", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Fuse",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("Manufacturer", Text),
            ("Model", Text),
            ("FuseClass", Text),
            ("RatedAmps", Numeric),
            ("InterruptingKA", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Cable",
        key: &["EquipmentID", "ToBus"],
        properties: &[
            ("EquipmentID", Text),
            ("FromBus", Text),
            ("ToBus", Text),
            ("ConductorSize", Text),
            ("ConductorMaterial", Text),
            ("Insulation", Text),
            ("LengthFt", Numeric),
            ("ConductorsPerPhase", Numeric),
            ("Ampacity", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Busway",
        key: &["EquipmentID", "ToBus"],
        properties: &[
            ("EquipmentID", Text),
            ("FromBus", Text),
            ("ToBus", Text),
            ("RatedAmps", Numeric),
            ("LengthFt", Numeric),
            ("BuswayType", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "TransmissionLine",
        key: &["EquipmentID", "ToBus"],
        properties: &[
            ("EquipmentID", Text),
            ("FromBus", Text),
            ("ToBus", Text),
            ("LengthMi", Numeric),
            ("PositiveSeqR", Numeric),
            ("PositiveSeqX", Numeric),
            ("ZeroSeqR", Numeric),
            ("ZeroSeqX", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Transformer2W",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("PrimaryBus", Text),
            ("SecondaryBus", Text),
            ("RatedKVA", Numeric),
            ("PrimaryKV", Numeric),
            ("SecondaryKV", Numeric),
            ("ImpedancePct", Numeric),
            ("XRRatio", Numeric),
            ("Connection", Text),
            ("TapSetting", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Transformer3W",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("PrimaryBus", Text),
            ("SecondaryBus", Text),
            ("TertiaryBus", Text),
            ("PrimaryKVA", Numeric),
            ("SecondaryKVA", Numeric),
            ("TertiaryKVA", Numeric),
            ("PrimaryKV", Numeric),
            ("SecondaryKV", Numeric),
            ("TertiaryKV", Numeric),
            ("ImpedancePSPct", Numeric),
            ("ImpedancePTPct", Numeric),
            ("ImpedanceSTPct", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Relay",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("Manufacturer", Text),
            ("Model", Text),
            ("CurveType", Text),
            ("PickupAmps", Numeric),
            ("TimeDial", Numeric),
            ("InstantaneousAmps", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Contactor",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("NEMASize", Text),
            ("RatedAmps", Numeric),
            ("Status", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "MCC",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKV", Numeric),
            ("BusAmps", Numeric),
            ("BracingKA", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Panel",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKV", Numeric),
            ("MainAmps", Numeric),
            ("BracingKA", Numeric),
            ("PanelType", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Switchgear",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKV", Numeric),
            ("BusAmps", Numeric),
            ("BracingKA", Numeric),
            ("EnclosureType", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "LoadTerminal",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKVA", Numeric),
            ("PowerFactor", Numeric),
            ("LoadClass", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Motor",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedHP", Numeric),
            ("RatedKV", Numeric),
            ("FullLoadAmps", Numeric),
            ("LockedRotorMultiple", Numeric),
            ("PowerFactor", Numeric),
            ("Efficiency", Numeric),
            ("MotorType", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Generator",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKVA", Numeric),
            ("RatedKV", Numeric),
            ("SubtransientX", Numeric),
            ("TransientX", Numeric),
            ("XRRatio", Numeric),
            ("Grounding", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "UtilityFeed",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("NominalKV", Numeric),
            ("ThreePhaseMVA", Numeric),
            ("LineToGroundMVA", Numeric),
            ("XRRatio", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Capacitor",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKVAR", Numeric),
            ("RatedKV", Numeric),
            ("Steps", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Reactor",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("ImpedanceOhms", Numeric),
            ("RatedAmps", Numeric),
            ("RatedKV", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "CTransformer",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("Ratio", Text),
            ("AccuracyClass", Text),
            ("BurdenVA", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "VTransformer",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("Ratio", Text),
            ("AccuracyClass", Text),
            ("BurdenVA", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "ATS",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("NormalBus", Text),
            ("EmergencyBus", Text),
            ("RatedAmps", Numeric),
            ("TransferType", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "VFD",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedHP", Numeric),
            ("RatedAmps", Numeric),
            ("BypassInstalled", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "UPS",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("InputBus", Text),
            ("OutputBus", Text),
            ("RatedKVA", Numeric),
            ("BypassBus", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Inverter",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKVA", Numeric),
            ("RatedKV", Numeric),
            ("FaultContributionPct", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "ChargerRectifier",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKVA", Numeric),
            ("DCVoltage", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "Battery",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("Cells", Numeric),
            ("AmpHours", Numeric),
            ("NominalVolts", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "HarmonicFilter",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("TunedHarmonic", Numeric),
            ("RatedKVAR", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "GroundingResistor",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("ResistanceOhms", Numeric),
            ("RatedAmps", Numeric),
            ("TimeRatingSec", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "PhotovoltaicArray",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKW", Numeric),
            ("RatedKV", Numeric),
            ("FaultContributionPct", Numeric),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "WindTurbine",
        key: &["EquipmentID"],
        properties: &[
            ("EquipmentID", Text),
            ("Description", Text),
            ("ConnectedBus", Text),
            ("RatedKW", Numeric),
            ("RatedKV", Numeric),
            ("TurbineType", Text),
        ],
        deprecated: &[],
    },
    TypeSpec {
        name: "ArcFlashResult",
        key: &["Scenario", "EquipmentID"],
        properties: &[
            ("Scenario", Text),
            ("EquipmentID", Text),
            ("WorkingDistanceIn", Numeric),
            ("BoltedFaultKA", Numeric),
            ("ArcingFaultKA", Numeric),
            ("TripTimeSec", Numeric),
            ("IncidentEnergy", Numeric),
            ("ArcFlashBoundaryIn", Numeric),
            ("ProtectiveDevice", Text),
            ("PPEClassLegacy", Text),
        ],
        deprecated: &["PPEClassLegacy"],
    },
    TypeSpec {
        name: "ShortCircuitResult",
        key: &["Scenario", "EquipmentID"],
        properties: &[
            ("Scenario", Text),
            ("EquipmentID", Text),
            ("ThreePhaseKA", Numeric),
            ("LineToGroundKA", Numeric),
            ("LineToLineKA", Numeric),
            ("AsymmetricalKA", Numeric),
            ("XOverR", Numeric),
        ],
        deprecated: &[],
    },
];
