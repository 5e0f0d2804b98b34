quick_error! {
    #[derive(Debug)]
    pub enum ConfError {
        IOError(e: std::io::Error) {
            from(e: std::io::Error) -> (e)
            display("read config: {}", e)
        }

        BadYaml(e: serde_yaml::Error) {
            from(e: serde_yaml::Error) -> (e)
            display("parse config: {}", e)
        }

        /// The timeout is zero.
        InvalidTimeout {
            display("invalid timeout")
        }

        /// The increment is zero.
        InvalidIncrement {
            display("invalid increment")
        }

        NoInstance {
            display("missing instance definition")
        }

        /// An instance has an empty name or an empty address.
        InvalidInstanceDefinition {
            display("invalid instance definition")
        }

        /// Two instances share a name or an address.
        DuplicateInstance(what: String) {
            display("duplicate instance: {}", what)
        }
    }
}

impl PartialEq<ConfError> for ConfError {
    fn eq(&self, other: &ConfError) -> bool {
        match (self, other) {
            (Self::IOError(a), Self::IOError(b)) => a.kind() == b.kind(),
            (Self::BadYaml(_), Self::BadYaml(_)) => true,
            (Self::InvalidTimeout, Self::InvalidTimeout) => true,
            (Self::InvalidIncrement, Self::InvalidIncrement) => true,
            (Self::NoInstance, Self::NoInstance) => true,
            (Self::InvalidInstanceDefinition, Self::InvalidInstanceDefinition) => true,
            (Self::DuplicateInstance(a), Self::DuplicateInstance(b)) => a == b,
            _ => false,
        }
    }
}
