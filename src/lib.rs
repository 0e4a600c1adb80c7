pub mod batch;

pub mod configuration;

pub mod equation {
    pub mod equationfamily;
    pub mod equationerror;
    pub mod equation;
    pub mod equationresult;
    pub mod evaluator;
}

pub mod logging;

pub mod math {
    pub mod curve {
        pub mod curve;
    }
    pub mod polynomial {
        pub mod polynomialroots;
    }
    pub mod expressiontext;
    pub mod round;
}

pub mod plot {
    pub mod samplingwindow;
    pub mod plotseries;
}

pub mod presentation {
    pub mod textreport;
}
