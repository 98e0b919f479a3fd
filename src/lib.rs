pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
        }
        pub mod staircase {
            pub mod blendfunction;
            pub mod staircase;
            pub mod staircaseerror;
            pub mod staircaseparameters;
            pub mod zone;
        }
    }
}
