#![allow(clippy::unwrap_used, clippy::expect_used)]


pub(super) const V1_SAMPLE: &str = "v1\tnamed\ttarget
# INTERMEDIARY-COUNTER class 3
CLASS\tFoo\tC1
CLASS\tBar\tC2
FIELD\tFoo\tLBar;\tpartner\tf1
METHOD\tFoo\t()V\tdoWork\tm1
METHOD\tFoo\t(I)V\tdoWork\tm2
";

pub(super) const V2_SAMPLE: &str = "tiny\t2\t0\tnamed\ttarget
c\tFoo\tC1
\tc\tThe class everything extends.
\tf\tLBar;\tpartner\tf1
\tm\t()V\tdoWork\tm1
\t\tc\tDoes the work.
\tm\t(I)V\tdoWork\tm2
\t\tp\t1\tamount\t
\t\tv\t2\t4\t-1\tscratch\t
\t\t\tc\tTemporary.
c\tBar\tC2
";
